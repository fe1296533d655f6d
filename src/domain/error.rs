//! Error types for tars-config.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use super::types::FieldId;

/// A fatal problem with one declared field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Required field absent from the source and without a default
    #[error("{field}: required field is missing")]
    Missing { field: FieldId },

    /// Value present but not convertible to the declared type
    #[error("{field}: expected {expected}, got {shown}")]
    TypeCoercion {
        field: FieldId,
        expected: String,
        /// Quoted raw value, or the redaction placeholder for secrets
        shown: String,
    },

    /// Value converted but failed a semantic constraint
    #[error("{field}: {message}")]
    Validation { field: FieldId, message: String },
}

impl FieldError {
    /// The field this error is about.
    pub fn field(&self) -> &FieldId {
        match self {
            FieldError::Missing { field }
            | FieldError::TypeCoercion { field, .. }
            | FieldError::Validation { field, .. } => field,
        }
    }
}

/// Non-fatal: a key in the source that no declared field claims.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} (line {line}): unknown key, ignored")]
pub struct UnknownKeyWarning {
    pub field: FieldId,
    pub line: usize,
}

/// Malformed line in the configuration text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct SyntaxError {
    pub line: usize,
    pub message: String,
}

/// Programmer error in a schema declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("{0}: declared more than once")]
    DuplicateField(FieldId),

    #[error("{field}: default does not match declared type {expected}")]
    DefaultKind { field: FieldId, expected: String },

    #[error("{field}: default is invalid: {message}")]
    DefaultInvalid { field: FieldId, message: String },

    #[error("{field}: validator {validator} cannot check a {kind} field")]
    ValidatorKind {
        field: FieldId,
        validator: String,
        kind: String,
    },

    #[error("requirement refers to undeclared field {0}")]
    UnknownRequirementField(FieldId),

    #[error("[{section}]: fields must be declared together, {field} comes after another section")]
    SplitSection { section: String, field: FieldId },
}

/// Failure to produce a snapshot.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Configuration file could not be read
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration text is malformed
    #[error("{}", Listing("syntax error", .0))]
    Syntax(Vec<SyntaxError>),

    /// One or more declared fields failed to resolve
    #[error("{}", Listing("configuration error", .errors))]
    Invalid {
        errors: Vec<FieldError>,
        warnings: Vec<UnknownKeyWarning>,
    },
}

impl LoadError {
    /// Field errors, if this is a validation failure.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            LoadError::Invalid { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Warnings gathered before the failure.
    pub fn warnings(&self) -> &[UnknownKeyWarning] {
        match self {
            LoadError::Invalid { warnings, .. } => warnings,
            _ => &[],
        }
    }
}

/// Renders "N <noun>(s):" followed by one indented line per item.
struct Listing<'a, T>(&'a str, &'a [T]);

impl<T: fmt::Display> fmt::Display for Listing<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Listing(noun, items) = self;
        let plural = if items.len() == 1 { "" } else { "s" };
        write!(f, "found {} {}{}:", items.len(), noun, plural)?;
        for item in items.iter() {
            write!(f, "\n  - {}", item)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_lists_every_error() {
        let err = LoadError::Invalid {
            errors: vec![
                FieldError::Missing {
                    field: FieldId::new("CHAR", "character_card_path"),
                },
                FieldError::Validation {
                    field: FieldId::new("LLM", "llm_backend"),
                    message: "'gpt' is not one of [openai, ooba, tabby]".to_string(),
                },
            ],
            warnings: Vec::new(),
        };

        let text = err.to_string();
        assert!(text.starts_with("found 2 configuration errors:"));
        assert!(text.contains("\n  - [CHAR] character_card_path: required field is missing"));
        assert!(text.contains("\n  - [LLM] llm_backend: 'gpt' is not one of"));
        assert_eq!(err.field_errors().len(), 2);
    }

    #[test]
    fn test_syntax_listing_singular() {
        let err = LoadError::Syntax(vec![SyntaxError {
            line: 3,
            message: "missing '=' or ':'".to_string(),
        }]);
        assert_eq!(
            err.to_string(),
            "found 1 syntax error:\n  - line 3: missing '=' or ':'"
        );
    }
}
