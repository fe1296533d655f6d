//! Resolution of a parsed source against a schema.

use tracing::{debug, warn};

use super::schema::{ConfigField, Schema};
use super::types::{ConfigSnapshot, ResolvedField};
use crate::domain::parser::{ConfigSource, Entry};
use crate::domain::{
    ConfigValue, FieldError, FieldId, FieldKind, LoadError, Origin, UnknownKeyWarning,
};

/// Turns a [`ConfigSource`] into a [`ConfigSnapshot`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Resolve every declared field.
    ///
    /// Absent fields take their default or are reported missing. Present
    /// fields are coerced, then validated. Cross-field requirements run last.
    /// Keys the schema does not declare become warnings.
    ///
    /// # Errors
    ///
    /// [`LoadError::Invalid`] with every field error, in declaration order.
    /// No snapshot is produced when any field fails.
    pub fn load(source: &ConfigSource, schema: &Schema) -> Result<ConfigSnapshot, LoadError> {
        let mut resolved = Vec::with_capacity(schema.fields().len());
        let mut errors = Vec::new();

        for field in schema.fields() {
            let id = field.id();
            match source.get(&id.section, &id.key) {
                Some(entry) => match Self::resolve(field, entry) {
                    Ok(value) => {
                        debug!(field = %id, line = entry.line, "resolved from source");
                        resolved.push(ResolvedField::new(
                            id.clone(),
                            value,
                            Origin::Source { line: entry.line },
                            field.is_secret(),
                        ));
                    }
                    Err(e) => errors.push(e),
                },
                None => match field.declared_default() {
                    Some(default) => {
                        debug!(field = %id, "using default");
                        resolved.push(ResolvedField::new(
                            id.clone(),
                            default.clone(),
                            Origin::Default,
                            field.is_secret(),
                        ));
                    }
                    None => errors.push(FieldError::Missing { field: id.clone() }),
                },
            }
        }

        Self::check_requirements(schema, &resolved, &mut errors);

        let warnings = Self::unknown_keys(source, schema);
        for w in &warnings {
            warn!(section = %w.field.section, key = %w.field.key, line = w.line, "unknown configuration key ignored");
        }

        if !errors.is_empty() {
            return Err(LoadError::Invalid { errors, warnings });
        }

        Ok(ConfigSnapshot::new(resolved, warnings))
    }

    /// Coerce and validate one present entry.
    fn resolve(field: &ConfigField, entry: &Entry) -> Result<ConfigValue, FieldError> {
        let id = field.id();
        let shown = field.shown(&entry.value);

        let value = field
            .kind()
            .coerce(&entry.value)
            .ok_or_else(|| FieldError::TypeCoercion {
                field: id.clone(),
                expected: field.kind().name(),
                shown: shown.clone(),
            })?;

        let invalid = |message: String| FieldError::Validation {
            field: id.clone(),
            message,
        };

        let value = match (field.kind(), value) {
            (FieldKind::Enum(allowed), ConfigValue::Str(s)) => {
                let canonical = allowed
                    .iter()
                    .find(|a| a.eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| {
                        invalid(format!("{} is not one of [{}]", shown, allowed.join(", ")))
                    })?;
                ConfigValue::from(*canonical)
            }
            (_, value) => value,
        };

        for validator in field.validators() {
            validator.check(&value, &shown).map_err(invalid)?;
        }

        Ok(value)
    }

    /// "When A equals V, B must be non-empty." Skipped when either side failed.
    fn check_requirements(schema: &Schema, resolved: &[ResolvedField], errors: &mut Vec<FieldError>) {
        fn lookup<'a>(resolved: &'a [ResolvedField], id: &FieldId) -> Option<&'a ConfigValue> {
            resolved.iter().find(|f| f.id() == id).map(ResolvedField::value)
        }

        for requirement in schema.requirements() {
            let (Some(when), Some(then)) = (
                lookup(resolved, &requirement.when),
                lookup(resolved, &requirement.then),
            ) else {
                continue;
            };
            if *when != requirement.equals {
                continue;
            }
            let empty = match then {
                ConfigValue::Str(s) => s.trim().is_empty(),
                _ => false,
            };
            if empty {
                errors.push(FieldError::Validation {
                    field: requirement.then.clone(),
                    message: format!(
                        "must be set when {} = {}",
                        requirement.when, requirement.equals
                    ),
                });
            }
        }
    }

    fn unknown_keys(source: &ConfigSource, schema: &Schema) -> Vec<UnknownKeyWarning> {
        source
            .sections()
            .flat_map(|section| {
                section
                    .entries
                    .iter()
                    .filter(|entry| !schema.contains(&section.name, &entry.key))
                    .map(|entry| UnknownKeyWarning {
                        field: FieldId::new(section.name.clone(), entry.key.clone()),
                        line: entry.line,
                    })
            })
            .collect()
    }
}
