//! Declared configuration schema.
//!
//! A [`Schema`] is the complete list of [`ConfigField`]s a loader resolves,
//! plus cross-field [`Requirement`]s. Construction rejects inconsistent
//! declarations so that the loader only ever reports problems in the source.

use std::collections::HashSet;

use super::validation::Validator;
use crate::domain::{ConfigValue, FieldId, FieldKind, SchemaError, REDACTED};

/// One declared (section, key) with its type and constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigField {
    id: FieldId,
    kind: FieldKind,
    default: Option<ConfigValue>,
    validators: Vec<Validator>,
    secret: bool,
    description: &'static str,
}

impl ConfigField {
    pub fn new(section: &str, key: &str, kind: FieldKind) -> Self {
        Self {
            id: FieldId::new(section, key),
            kind,
            default: None,
            validators: Vec::new(),
            secret: false,
            description: "",
        }
    }

    pub fn string(section: &str, key: &str) -> Self {
        Self::new(section, key, FieldKind::String)
    }

    pub fn boolean(section: &str, key: &str) -> Self {
        Self::new(section, key, FieldKind::Bool)
    }

    pub fn integer(section: &str, key: &str) -> Self {
        Self::new(section, key, FieldKind::Integer)
    }

    pub fn float(section: &str, key: &str) -> Self {
        Self::new(section, key, FieldKind::Float)
    }

    /// String field restricted to `allowed`.
    pub fn enumeration(section: &str, key: &str, allowed: &'static [&'static str]) -> Self {
        Self::new(section, key, FieldKind::Enum(allowed))
    }

    /// Value used when the key is absent. Fields without one are required.
    pub fn default_value(mut self, value: impl Into<ConfigValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn validate(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Mark the value as sensitive: it is never echoed in diagnostics.
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn id(&self) -> &FieldId {
        &self.id
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn declared_default(&self) -> Option<&ConfigValue> {
        self.default.as_ref()
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn is_secret(&self) -> bool {
        self.secret
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// How `raw` may appear in a diagnostic for this field.
    pub(crate) fn shown(&self, raw: &str) -> String {
        if self.secret {
            REDACTED.to_string()
        } else {
            format!("'{}'", raw)
        }
    }

    /// Check a declaration for internal consistency.
    fn check(&self) -> Result<(), SchemaError> {
        for validator in &self.validators {
            if !validator.applies_to(self.kind) {
                return Err(SchemaError::ValidatorKind {
                    field: self.id.clone(),
                    validator: validator.to_string(),
                    kind: self.kind.name(),
                });
            }
        }

        let Some(default) = &self.default else {
            return Ok(());
        };
        if !self.kind.accepts(default) {
            return Err(SchemaError::DefaultKind {
                field: self.id.clone(),
                expected: self.kind.name(),
            });
        }
        let invalid = |message: String| SchemaError::DefaultInvalid {
            field: self.id.clone(),
            message,
        };
        let shown = self.shown(&default.to_string());
        if let (FieldKind::Enum(allowed), ConfigValue::Str(s)) = (self.kind, default) {
            if !allowed.contains(&s.as_str()) {
                return Err(invalid(format!("{} is not one of [{}]", shown, allowed.join(", "))));
            }
        }
        for validator in &self.validators {
            validator.check(default, &shown).map_err(invalid)?;
        }
        Ok(())
    }
}

/// "When `when` equals `equals`, `then` must be non-empty."
#[derive(Debug, Clone, PartialEq)]
pub struct Requirement {
    pub when: FieldId,
    pub equals: ConfigValue,
    pub then: FieldId,
}

impl Requirement {
    pub fn new(when: (&str, &str), equals: impl Into<ConfigValue>, then: (&str, &str)) -> Self {
        Self {
            when: FieldId::new(when.0, when.1),
            equals: equals.into(),
            then: FieldId::new(then.0, then.1),
        }
    }
}

/// The complete set of declared fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    fields: Vec<ConfigField>,
    requirements: Vec<Requirement>,
}

impl Schema {
    /// Build a schema.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistent declaration: a duplicate field, a
    /// section whose fields are not contiguous, a default of the wrong type
    /// or failing its own validators, a validator that cannot check the
    /// field's type, or a requirement naming an undeclared field.
    pub fn new(fields: Vec<ConfigField>, requirements: Vec<Requirement>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        // Renderings emit one header per run of fields, so a section may not resume
        let mut closed: HashSet<&str> = HashSet::new();
        let mut current: Option<&str> = None;
        for field in &fields {
            if !seen.insert(field.id.clone()) {
                return Err(SchemaError::DuplicateField(field.id.clone()));
            }
            let section = field.id.section.as_str();
            if current != Some(section) {
                if closed.contains(section) {
                    return Err(SchemaError::SplitSection {
                        section: section.to_string(),
                        field: field.id.clone(),
                    });
                }
                if let Some(previous) = current.replace(section) {
                    closed.insert(previous);
                }
            }
            field.check()?;
        }
        for requirement in &requirements {
            for id in [&requirement.when, &requirement.then] {
                if !seen.contains(id) {
                    return Err(SchemaError::UnknownRequirementField(id.clone()));
                }
            }
        }
        Ok(Self { fields, requirements })
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[ConfigField] {
        &self.fields
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn field(&self, section: &str, key: &str) -> Option<&ConfigField> {
        let key = key.to_ascii_lowercase();
        self.fields
            .iter()
            .find(|f| f.id.section == section && f.id.key == key)
    }

    pub fn contains(&self, section: &str, key: &str) -> bool {
        self.field(section, key).is_some()
    }
}
