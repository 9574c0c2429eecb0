//! `xsd:float`
use serde_json::Value;

use crate::{FormatError, ScalarKind};

// Integers up to 2^53 are exactly representable as f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

pub fn parse(raw: &Value) -> Result<f64, FormatError> {
    let Value::Number(n) = raw else {
        return Err(FormatError::unexpected(ScalarKind::Float, "number", raw));
    };

    n.as_f64()
        .ok_or_else(|| FormatError::new(ScalarKind::Float, format!("{n} is out of range")))
}

/// Integral values are written as JSON integers, so `1.0` and `1` share
/// one wire form. Non-finite values have no JSON form and become `null`.
pub fn format(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_float() {
        assert_eq!(parse(&json!(36.75)).unwrap(), 36.75);
        assert_eq!(parse(&json!(-119)).unwrap(), -119.0);
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        assert!(parse(&json!("36.75")).is_err());
        assert!(parse(&json!({"value": 1})).is_err());
    }

    #[test]
    fn test_format_integral_values_as_integers() {
        assert_eq!(format(94.5), json!(94.5));
        assert_eq!(format(100.0), json!(100));
        assert_eq!(format(-3.0), json!(-3));
        assert_eq!(format(f64::NAN), Value::Null);
    }

    #[test]
    fn test_round_trip() {
        for v in [0.0, 0.25, -17.5, 1e10] {
            assert_eq!(parse(&format(v)).unwrap(), v);
        }
    }
}
