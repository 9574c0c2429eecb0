use dotenv_flow::dotenv_flow;

pub const EMIT_DEFAULT_CONTEXT: &str = "VOCAB_EMIT_DEFAULT_CONTEXT";
pub const PRESERVE_CONTEXT: &str = "VOCAB_PRESERVE_CONTEXT";

/// Knobs for encoding and decoding top-level documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Write the ActivityStreams namespace as `@context` on documents that
    /// carry none.
    pub emit_default_context: bool,
    /// Keep an incoming `@context` for re-emission.
    pub preserve_context: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            emit_default_context: true,
            preserve_context: true,
        }
    }
}

impl CodecConfig {
    /// Loads `.env` files, then reads the configuration from the environment.
    pub fn load() -> Self {
        dotenv_flow().ok();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| match lookup(key) {
            None => default,
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!("ignoring invalid {key}={raw:?}, using {default}");
                default
            }),
        };

        Self {
            emit_default_context: flag(EMIT_DEFAULT_CONTEXT, defaults.emit_default_context),
            preserve_context: flag(PRESERVE_CONTEXT, defaults.preserve_context),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
