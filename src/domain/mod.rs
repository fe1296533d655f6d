//! Domain layer containing the core configuration model.
//!
//! This module contains:
//! - Field identity, declared kinds and typed values
//! - INI source parser
//! - Error and warning types
//! - Logger with rotation

mod error;
pub mod logger;
pub mod parser;
mod types;

pub use error::{FieldError, LoadError, SchemaError, SyntaxError, UnknownKeyWarning};
pub use parser::ConfigSource;
pub use types::{parse_bool, ConfigValue, FieldId, FieldKind, Origin, REDACTED};
