//! Field validators.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::domain::{ConfigValue, FieldKind};

/// Scheme, host and optional port/path. Shape only; nothing is resolved.
const URL_PATTERN: &str = r"^(?i)(https?|wss?)://[a-z0-9._~%-]+(\.[a-z0-9._~%-]+)*(:\d{1,5})?(/\S*)?$";

fn url_regex() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| Regex::new(URL_PATTERN).expect("URL pattern is valid"))
}

/// Semantic constraint checked after type coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    /// Inclusive integer range
    IntRange { min: i64, max: i64 },
    /// Inclusive float range
    FloatRange { min: f64, max: f64 },
    /// TCP/UDP port, 1..=65535
    Port,
    /// String must contain something other than whitespace
    NonEmpty,
    /// http(s)/ws(s) URL shape
    Url,
    /// String must be one of the listed values (exact match)
    OneOf(&'static [&'static str]),
}

impl Validator {
    /// Whether this validator can check values of `kind`.
    pub fn applies_to(&self, kind: FieldKind) -> bool {
        match self {
            Validator::IntRange { .. } | Validator::Port => kind == FieldKind::Integer,
            Validator::FloatRange { .. } => kind == FieldKind::Float,
            Validator::NonEmpty | Validator::Url | Validator::OneOf(_) => {
                matches!(kind, FieldKind::String | FieldKind::Enum(_))
            }
        }
    }

    /// Check a value.
    ///
    /// `shown` is how the value may appear in the message: quoted text for
    /// ordinary fields, a placeholder for secrets.
    pub fn check(&self, value: &ConfigValue, shown: &str) -> Result<(), String> {
        match (self, value) {
            (Validator::IntRange { min, max }, ConfigValue::Int(v)) => {
                if (*min..=*max).contains(v) {
                    Ok(())
                } else {
                    Err(format!("{} is out of range {}..={}", shown, min, max))
                }
            }
            (Validator::FloatRange { min, max }, ConfigValue::Float(v)) => {
                if (*min..=*max).contains(v) {
                    Ok(())
                } else {
                    Err(format!("{} is out of range {}..={}", shown, min, max))
                }
            }
            (Validator::Port, ConfigValue::Int(v)) => {
                if (1..=65535).contains(v) {
                    Ok(())
                } else {
                    Err(format!("{} is not a valid port (1..=65535)", shown))
                }
            }
            (Validator::NonEmpty, ConfigValue::Str(s)) => {
                if s.trim().is_empty() {
                    Err("must not be empty".to_string())
                } else {
                    Ok(())
                }
            }
            (Validator::Url, ConfigValue::Str(s)) => {
                if url_regex().is_match(s) {
                    Ok(())
                } else {
                    Err(format!("{} is not an http(s) or ws(s) URL", shown))
                }
            }
            (Validator::OneOf(allowed), ConfigValue::Str(s)) => {
                if allowed.contains(&s.as_str()) {
                    Ok(())
                } else {
                    Err(format!("{} is not one of [{}]", shown, allowed.join(", ")))
                }
            }
            _ => Err(format!("{} cannot be checked by {}", shown, self)),
        }
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::IntRange { min, max } => write!(f, "range {}..={}", min, max),
            Validator::FloatRange { min, max } => write!(f, "range {}..={}", min, max),
            Validator::Port => write!(f, "port"),
            Validator::NonEmpty => write!(f, "non-empty"),
            Validator::Url => write!(f, "url"),
            Validator::OneOf(allowed) => write!(f, "one of [{}]", allowed.join(", ")),
        }
    }
}
