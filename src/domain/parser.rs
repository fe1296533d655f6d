//! INI-style configuration parser.
//!
//! Turns `[Section]` / `key = value` text into an ordered [`ConfigSource`],
//! keeping line numbers for diagnostics. All syntax errors are collected in a
//! single pass.

use super::error::SyntaxError;

/// Prefixes that start a comment line
const COMMENT_PREFIXES: &[char] = &['#', ';'];

/// Key/value delimiters, first occurrence wins
const DELIMITERS: &[char] = &['=', ':'];

/// One `key = value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
    pub line: usize,
}

/// A named group of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub line: usize,
    pub entries: Vec<Entry>,
}

impl Section {
    fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }
}

/// Parsed configuration text: sections in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSource {
    sections: Vec<Section>,
}

impl ConfigSource {
    /// Parse INI-like text.
    ///
    /// # Errors
    ///
    /// Returns every malformed line found, in line order.
    pub fn parse(text: &str) -> Result<Self, Vec<SyntaxError>> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut sections: Vec<Section> = Vec::new();
        let mut errors = Vec::new();
        // Set while inside a duplicate header so its entries are not misattributed
        let mut skipping = false;

        for (idx, raw_line) in text.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw_line.trim();

            if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIXES) {
                continue;
            }

            if trimmed.starts_with('[') {
                let header = strip_inline_comment(trimmed);
                let name = match header.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
                    Some(name) => name.trim(),
                    None => {
                        errors.push(syntax(line, "malformed section header"));
                        skipping = true;
                        continue;
                    }
                };
                if name.is_empty() {
                    errors.push(syntax(line, "empty section name"));
                    skipping = true;
                    continue;
                }
                if let Some(first) = sections.iter().find(|s| s.name == name) {
                    errors.push(syntax(
                        line,
                        format!("duplicate section [{}] (first defined on line {})", name, first.line),
                    ));
                    skipping = true;
                    continue;
                }
                skipping = false;
                sections.push(Section {
                    name: name.to_string(),
                    line,
                    entries: Vec::new(),
                });
                continue;
            }

            let Some(pos) = trimmed.find(DELIMITERS) else {
                errors.push(syntax(line, "expected 'key = value'"));
                continue;
            };
            let key = trimmed[..pos].trim().to_ascii_lowercase();
            let value = strip_inline_comment(&trimmed[pos + 1..]).trim().to_string();

            if key.is_empty() {
                errors.push(syntax(line, "empty key"));
                continue;
            }
            if skipping {
                continue;
            }
            let Some(section) = sections.last_mut() else {
                errors.push(syntax(line, format!("key '{}' appears before any [section]", key)));
                continue;
            };
            if let Some(first) = section.entry(&key) {
                errors.push(syntax(
                    line,
                    format!(
                        "duplicate key '{}' in [{}] (first defined on line {})",
                        key, section.name, first.line
                    ),
                ));
                continue;
            }
            section.entries.push(Entry { key, value, line });
        }

        if errors.is_empty() {
            Ok(Self { sections })
        } else {
            Err(errors)
        }
    }

    /// Look up an entry. Section names are case-sensitive, keys are not.
    pub fn get(&self, section: &str, key: &str) -> Option<&Entry> {
        let key = key.to_ascii_lowercase();
        self.section(section).and_then(|s| s.entry(&key))
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }
}

/// Drop a trailing `#` or `;` comment. The marker must follow whitespace so
/// that values like `http://host/#anchor` survive.
fn strip_inline_comment(s: &str) -> &str {
    let mut prev_ws = false;
    for (i, c) in s.char_indices() {
        if prev_ws && COMMENT_PREFIXES.contains(&c) {
            return s[..i].trim_end();
        }
        prev_ws = c.is_whitespace();
    }
    s
}

fn syntax(line: usize, message: impl Into<String>) -> SyntaxError {
    SyntaxError {
        line,
        message: message.into(),
    }
}
