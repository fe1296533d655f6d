//! Core domain types: field identity, declared kinds and typed values.

use serde::Serialize;
use std::fmt;

/// Placeholder shown in place of secret values.
pub const REDACTED: &str = "[REDACTED]";

/// Identity of a declared field: a (section, key) pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId {
    pub section: String,
    pub key: String,
}

impl FieldId {
    /// Create a field id. Keys are case-insensitive and stored lower-cased.
    pub fn new(section: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            key: key.into().to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.section, self.key)
    }
}

/// Declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Bool,
    Integer,
    Float,
    /// String restricted to an explicit allowed set.
    Enum(&'static [&'static str]),
}

impl FieldKind {
    /// Human-readable name used in diagnostics.
    pub fn name(&self) -> String {
        match self {
            FieldKind::String => "string".to_string(),
            FieldKind::Bool => "boolean".to_string(),
            FieldKind::Integer => "integer".to_string(),
            FieldKind::Float => "float".to_string(),
            FieldKind::Enum(allowed) => format!("one of [{}]", allowed.join(", ")),
        }
    }

    /// Coerce raw text into a value of this kind.
    ///
    /// Enum kinds coerce to a string here; membership is checked by the loader
    /// so that a bad enum value is reported as a validation error.
    pub fn coerce(&self, raw: &str) -> Option<ConfigValue> {
        match self {
            FieldKind::String | FieldKind::Enum(_) => Some(ConfigValue::Str(raw.to_string())),
            FieldKind::Bool => parse_bool(raw).map(ConfigValue::Bool),
            FieldKind::Integer => parse_int(raw).map(ConfigValue::Int),
            FieldKind::Float => parse_float(raw).map(ConfigValue::Float),
        }
    }

    /// Whether a value has the shape this kind produces.
    pub fn accepts(&self, value: &ConfigValue) -> bool {
        matches!(
            (self, value),
            (FieldKind::String, ConfigValue::Str(_))
                | (FieldKind::Enum(_), ConfigValue::Str(_))
                | (FieldKind::Bool, ConfigValue::Bool(_))
                | (FieldKind::Integer, ConfigValue::Int(_))
                | (FieldKind::Float, ConfigValue::Float(_))
        )
    }
}

/// A resolved, typed configuration value.
///
/// `Debug` prints the raw value; never format a secret field's value directly.
/// Go through [`crate::config::ConfigSnapshot`], which redacts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl ConfigValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Str(s) => write!(f, "{}", s),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Int(i) => write!(f, "{}", i),
            ConfigValue::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Str(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Str(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue::Int(i64::from(value))
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Int(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Read from the source at this 1-based line.
    Source { line: usize },
    /// Supplied by the field's declared default.
    Default,
}

/// Boolean spellings accepted case-insensitively.
const TRUE_WORDS: &[&str] = &["true", "yes", "1", "on"];
const FALSE_WORDS: &[&str] = &["false", "no", "0", "off"];

/// Parse a boolean. Anything outside the accepted spellings is rejected.
pub fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if TRUE_WORDS.iter().any(|w| raw.eq_ignore_ascii_case(w)) {
        Some(true)
    } else if FALSE_WORDS.iter().any(|w| raw.eq_ignore_ascii_case(w)) {
        Some(false)
    } else {
        None
    }
}

/// Parse a decimal integer with optional sign.
pub fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Parse a finite float. `inf` and `nan` are rejected.
pub fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|x| x.is_finite())
}
