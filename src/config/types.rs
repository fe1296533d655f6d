//! Resolved configuration snapshot.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::{ConfigValue, FieldId, Origin, UnknownKeyWarning, REDACTED};

/// One resolved field.
#[derive(Clone, PartialEq)]
pub struct ResolvedField {
    id: FieldId,
    value: ConfigValue,
    origin: Origin,
    secret: bool,
}

impl ResolvedField {
    pub(crate) fn new(id: FieldId, value: ConfigValue, origin: Origin, secret: bool) -> Self {
        Self {
            id,
            value,
            origin,
            secret,
        }
    }

    pub fn id(&self) -> &FieldId {
        &self.id
    }

    /// The real value. Secrets included: only diagnostics redact.
    pub fn value(&self) -> &ConfigValue {
        &self.value
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_secret(&self) -> bool {
        self.secret
    }

    /// Value as it may be printed.
    pub fn display_value(&self) -> String {
        if self.secret {
            REDACTED.to_string()
        } else {
            self.value.to_string()
        }
    }
}

impl fmt::Debug for ResolvedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ResolvedField");
        s.field("id", &self.id);
        if self.secret {
            s.field("value", &REDACTED);
        } else {
            s.field("value", &self.value);
        }
        s.field("origin", &self.origin).field("secret", &self.secret).finish()
    }
}

/// Immutable, fully validated configuration.
///
/// Built only by [`super::ConfigLoader`]; there are no mutating methods.
/// Share it across subsystems behind an `Arc`.
#[derive(Clone, PartialEq)]
pub struct ConfigSnapshot {
    fields: Vec<ResolvedField>,
    index: BTreeMap<FieldId, usize>,
    warnings: Vec<UnknownKeyWarning>,
}

impl ConfigSnapshot {
    pub(crate) fn new(fields: Vec<ResolvedField>, warnings: Vec<UnknownKeyWarning>) -> Self {
        let index = fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id.clone(), i))
            .collect();
        Self {
            fields,
            index,
            warnings,
        }
    }

    fn resolved(&self, section: &str, key: &str) -> Option<&ResolvedField> {
        let id = FieldId::new(section, key);
        self.index.get(&id).map(|&i| &self.fields[i])
    }

    /// Value of a declared field.
    pub fn get(&self, section: &str, key: &str) -> Option<&ConfigValue> {
        self.resolved(section, key).map(|f| &f.value)
    }

    pub fn get_str(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).and_then(ConfigValue::as_str)
    }

    pub fn get_bool(&self, section: &str, key: &str) -> Option<bool> {
        self.get(section, key).and_then(ConfigValue::as_bool)
    }

    pub fn get_int(&self, section: &str, key: &str) -> Option<i64> {
        self.get(section, key).and_then(ConfigValue::as_int)
    }

    pub fn get_float(&self, section: &str, key: &str) -> Option<f64> {
        self.get(section, key).and_then(ConfigValue::as_float)
    }

    pub fn origin(&self, section: &str, key: &str) -> Option<Origin> {
        self.resolved(section, key).map(|f| f.origin)
    }

    pub fn is_secret(&self, section: &str, key: &str) -> bool {
        self.resolved(section, key).is_some_and(|f| f.secret)
    }

    /// Resolved fields in schema declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedField> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Unknown keys seen in the source.
    pub fn warnings(&self) -> &[UnknownKeyWarning] {
        &self.warnings
    }

    /// `{ "SECTION": { "key": value } }` with secrets replaced by the placeholder.
    pub fn to_redacted_json(&self) -> Value {
        let mut root = Map::new();
        for field in &self.fields {
            let value = if field.secret {
                Value::String(REDACTED.to_string())
            } else {
                serde_json::to_value(&field.value).unwrap_or(Value::Null)
            };
            let section = root
                .entry(field.id.section.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(map) = section {
                map.insert(field.id.key.clone(), value);
            }
        }
        Value::Object(root)
    }
}

impl fmt::Debug for ConfigSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigSnapshot")
            .field("fields", &self.fields)
            .field("warnings", &self.warnings)
            .finish()
    }
}

/// INI-like rendering, secrets redacted.
impl fmt::Display for ConfigSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current: Option<&str> = None;
        for field in &self.fields {
            if current != Some(field.id.section.as_str()) {
                if current.is_some() {
                    writeln!(f)?;
                }
                writeln!(f, "[{}]", field.id.section)?;
                current = Some(field.id.section.as_str());
            }
            write!(f, "{} = {}", field.id.key, field.display_value())?;
            if field.origin == Origin::Default {
                write!(f, "  # default")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
