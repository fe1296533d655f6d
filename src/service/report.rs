//! Human-readable reports for the command line.

use std::fmt::Write;

use crate::config::{ConfigSnapshot, Schema};
use crate::domain::{FieldKind, LoadError, REDACTED};

/// Renders load results and schema listings.
pub struct ReportService;

impl ReportService {
    /// Field-by-field report of a failed load: every error, then every warning.
    pub fn failure(err: &LoadError) -> String {
        let mut out = String::new();
        match err {
            LoadError::Invalid { errors, warnings } => {
                let _ = writeln!(out, "Configuration is invalid:");
                for e in errors {
                    let _ = writeln!(out, "  error: {}", e);
                }
                for w in warnings {
                    let _ = writeln!(out, "  warning: {}", w);
                }
                let _ = write!(
                    out,
                    "{} error(s), {} warning(s)",
                    errors.len(),
                    warnings.len()
                );
            }
            LoadError::Syntax(errors) => {
                let _ = writeln!(out, "Configuration could not be parsed:");
                for e in errors {
                    let _ = writeln!(out, "  error: {}", e);
                }
                let _ = write!(out, "{} error(s)", errors.len());
            }
            LoadError::Io { .. } => {
                let _ = write!(out, "{}", err);
            }
        }
        out
    }

    /// One-line summary of a successful load, plus any warnings.
    pub fn success(snapshot: &ConfigSnapshot) -> String {
        let mut out = String::new();
        for w in snapshot.warnings() {
            let _ = writeln!(out, "  warning: {}", w);
        }
        let _ = write!(out, "Configuration is valid.");
        if !snapshot.warnings().is_empty() {
            let _ = write!(out, " ({} warning(s))", snapshot.warnings().len());
        }
        out
    }

    /// Table of declared fields grouped by section.
    pub fn schema(schema: &Schema) -> String {
        let mut out = String::new();
        let mut current: Option<&str> = None;
        for field in schema.fields() {
            let id = field.id();
            if current != Some(id.section.as_str()) {
                if current.is_some() {
                    out.push('\n');
                }
                let _ = writeln!(out, "[{}]", id.section);
                current = Some(id.section.as_str());
            }

            let default = match field.declared_default() {
                None => "required".to_string(),
                Some(_) if field.is_secret() => format!("default {}", REDACTED),
                Some(v) => format!("default {:?}", v.to_string()),
            };
            let mut flags: Vec<String> = field.validators().iter().map(ToString::to_string).collect();
            if field.is_secret() {
                flags.push("secret".to_string());
            }

            let _ = write!(out, "  {:<20} {:<10} {}", id.key, type_label(field.kind()), default);
            if !flags.is_empty() {
                let _ = write!(out, " [{}]", flags.join(", "));
            }
            if !field.description().is_empty() {
                let _ = write!(out, "  # {}", field.description());
            }
            out.push('\n');
        }
        out
    }
}

fn type_label(kind: FieldKind) -> String {
    match kind {
        FieldKind::Enum(allowed) => format!("enum({})", allowed.join("|")),
        other => other.name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{tars_schema, ConfigService};

    #[test]
    fn test_failure_report_lists_everything() {
        let schema = tars_schema().unwrap();
        let err = ConfigService::load_str("[LLM]\nllm_backend = gpt\nbogus = 1\n", &schema).unwrap_err();
        let report = ReportService::failure(&err);

        assert!(report.starts_with("Configuration is invalid:\n"));
        assert!(report.contains("  error: [CHAR] character_card_path: required field is missing\n"));
        assert!(report.contains("  error: [LLM] llm_backend: 'gpt' is not one of [openai, ooba, tabby]\n"));
        assert!(report.contains("  error: [LLM] base_url: required field is missing\n"));
        assert!(report.contains("  error: [TTS] ttsoption: required field is missing\n"));
        assert!(report.contains("  warning: [LLM] bogus (line 3): unknown key, ignored\n"));
        assert!(report.ends_with("4 error(s), 1 warning(s)"));
    }

    #[test]
    fn test_schema_listing() {
        let listing = ReportService::schema(&tars_schema().unwrap());
        assert!(listing.starts_with("[STT]\n"));
        assert!(listing.contains("use_server"));
        assert!(listing.contains("enum(openai|ooba|tabby)"));
        assert!(listing.contains("[DISCORD]\n"));
        let token_line = listing.lines().find(|l| l.trim_start().starts_with("token")).unwrap();
        assert!(token_line.contains("secret"), "{}", token_line);
        assert!(token_line.contains(REDACTED));
    }
}
