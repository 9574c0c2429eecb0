//! `xsd:duration`, carried on the wire as an ISO8601 duration string.
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::{FormatError, ScalarKind};

lazy_static! {
    static ref ISO8601_DURATION: Regex = Regex::new(concat!(
        r"^(-)?P",
        r"(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)W)?(?:(\d+)D)?",
        r"(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+(?:\.\d+)?)S)?)?$",
    ))
    .unwrap();
}

/// An ISO8601 duration, kept component-wise.
///
/// Calendar components are not normalized: `P1Y` and `P365D` are distinct
/// values that only become comparable through [`IsoDuration::to_chrono`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IsoDuration {
    pub negative: bool,
    pub years: u64,
    pub months: u64,
    pub weeks: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: f64,
}

impl IsoDuration {
    pub fn from_seconds(seconds: f64) -> Self {
        Self {
            negative: seconds < 0.0,
            seconds: seconds.abs(),
            ..Self::default()
        }
    }

    fn has_time(&self) -> bool {
        self.hours != 0 || self.minutes != 0 || self.seconds != 0.0
    }

    fn is_zero(&self) -> bool {
        !self.has_time() && self.years == 0 && self.months == 0 && self.weeks == 0 && self.days == 0
    }

    /// Converts to an exact span, counting a year as 365 days and a month as 30.
    ///
    /// Spans beyond what [`chrono::Duration`] can hold saturate at
    /// [`chrono::Duration::MAX`] (or its negation).
    pub fn to_chrono(&self) -> chrono::Duration {
        let days = u128::from(self.years) * 365
            + u128::from(self.months) * 30
            + u128::from(self.weeks) * 7
            + u128::from(self.days);
        let whole = days * 86_400 + u128::from(self.hours) * 3_600 + u128::from(self.minutes) * 60;
        // float to int casts saturate
        let fraction = (self.seconds * 1_000.0).round() as u128;
        let millis = (whole * 1_000).saturating_add(fraction);

        let span = i64::try_from(millis)
            .ok()
            .and_then(chrono::Duration::try_milliseconds)
            .unwrap_or(chrono::Duration::MAX);
        if self.negative {
            -span
        } else {
            span
        }
    }
}

impl fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative && !self.is_zero() {
            f.write_str("-")?;
        }
        f.write_str("P")?;
        if self.is_zero() {
            return f.write_str("T0S");
        }

        for (n, unit) in [
            (self.years, 'Y'),
            (self.months, 'M'),
            (self.weeks, 'W'),
            (self.days, 'D'),
        ] {
            if n != 0 {
                write!(f, "{n}{unit}")?;
            }
        }

        if self.has_time() {
            f.write_str("T")?;
            if self.hours != 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes != 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds != 0.0 {
                write!(f, "{}S", self.seconds)?;
            }
        }
        Ok(())
    }
}

pub fn parse(raw: &Value) -> Result<IsoDuration, FormatError> {
    let Some(s) = raw.as_str() else {
        return Err(FormatError::unexpected(ScalarKind::Duration, "string", raw));
    };

    let invalid = || FormatError::new(ScalarKind::Duration, format!("{s:?} is not an ISO8601 duration"));

    let caps = ISO8601_DURATION.captures(s).ok_or_else(invalid)?;

    // "P" and "PT" match the pattern but carry no component.
    if caps.iter().skip(2).all(|m| m.is_none()) {
        return Err(invalid());
    }
    if s.ends_with('T') {
        return Err(invalid());
    }

    let int = |i: usize| -> Result<u64, FormatError> {
        caps.get(i)
            .map(|m| m.as_str().parse::<u64>().map_err(|_| invalid()))
            .transpose()
            .map(Option::unwrap_or_default)
    };

    Ok(IsoDuration {
        negative: caps.get(1).is_some(),
        years: int(2)?,
        months: int(3)?,
        weeks: int(4)?,
        days: int(5)?,
        hours: int(6)?,
        minutes: int(7)?,
        seconds: caps
            .get(8)
            .map(|m| m.as_str().parse::<f64>().map_err(|_| invalid()))
            .transpose()?
            .unwrap_or_default(),
    })
}

pub fn format(value: &IsoDuration) -> Value {
    Value::String(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_components() {
        let d = parse(&json!("P3Y6M4DT12H30M5S")).unwrap();
        assert_eq!(
            d,
            IsoDuration {
                negative: false,
                years: 3,
                months: 6,
                weeks: 0,
                days: 4,
                hours: 12,
                minutes: 30,
                seconds: 5.0,
            }
        );
    }

    #[test]
    fn test_parse_rejects_empty_designators() {
        assert!(parse(&json!("P")).is_err());
        assert!(parse(&json!("PT")).is_err());
        assert!(parse(&json!("P1DT")).is_err());
        assert!(parse(&json!("5 minutes")).is_err());
        assert!(parse(&json!(300)).is_err());
    }

    #[test]
    fn test_round_trip_canonical_forms() {
        for raw in ["PT2H", "P1D", "PT0.5S", "-P2W", "P1Y2M", "PT1H30M", "PT0S"] {
            assert_eq!(format(&parse(&json!(raw)).unwrap()), json!(raw));
        }
    }

    #[test]
    fn test_to_chrono() {
        let d = parse(&json!("P1DT1M")).unwrap();
        assert_eq!(d.to_chrono(), chrono::Duration::seconds(86_460));

        let d = parse(&json!("-PT1.5S")).unwrap();
        assert_eq!(d.to_chrono(), chrono::Duration::milliseconds(-1_500));
    }

    #[test]
    fn test_to_chrono_saturates() {
        let huge = parse(&json!("P99999999999999999Y")).unwrap();
        assert_eq!(huge.to_chrono(), chrono::Duration::MAX);

        let huge = parse(&json!("-P99999999999999999YT99999999999999999H")).unwrap();
        assert_eq!(huge.to_chrono(), -chrono::Duration::MAX);

        let second = parse(&json!("PT1S")).unwrap();
        assert!(second.to_chrono() < parse(&json!("P99999999999999999Y")).unwrap().to_chrono());
    }

    #[test]
    fn test_from_seconds() {
        assert_eq!(IsoDuration::from_seconds(90.0).to_string(), "PT90S");
        assert_eq!(IsoDuration::from_seconds(0.0).to_string(), "PT0S");
    }
}
