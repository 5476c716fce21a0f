// crates/canopen-od/src/eds/lexer.rs
//! Splits EDS/DCF text into sections of `key=value` pairs.

use crate::diagnostics::{Diagnostics, WarningKind};
use crate::OdError;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Custom keys that are read even when written as a comment.
pub const COMMENTED_KEYS: [&str; 2] = ["StorageLocation", "TPDODetectCos"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub line: usize,
    pub pairs: Vec<KeyValue>,
}

impl Section {
    /// Value of a key, compared case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|kv| kv.key.eq_ignore_ascii_case(key))
            .map(|kv| kv.value.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn set(&mut self, pair: KeyValue, diag: &mut Diagnostics) {
        match self
            .pairs
            .iter_mut()
            .find(|kv| kv.key.eq_ignore_ascii_case(&pair.key))
        {
            Some(existing) => {
                diag.push(
                    WarningKind::DuplicateKey,
                    alloc::format!(
                        "Key '{}' repeated in [{}] at line {}, last value wins",
                        pair.key, self.name, pair.line
                    ),
                );
                *existing = pair;
            }
            None => self.pairs.push(pair),
        }
    }
}

/// Tokenizes the whole file. Sections appear in the order they were first
/// seen; a repeated section header continues the earlier section.
pub fn tokenize(text: &str, diag: &mut Diagnostics) -> Result<Vec<Section>, OdError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<usize> = None;

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let line = match line.strip_prefix(';') {
            Some(comment) => match commented_key(comment) {
                Some(pair) => pair,
                None => continue,
            },
            None => line,
        };

        if let Some(header) = line.strip_prefix('[') {
            let Some(name) = header.strip_suffix(']') else {
                return Err(malformed(line_no, raw));
            };
            let name = name.trim();
            if let Some(pos) = sections
                .iter()
                .position(|s| s.name.eq_ignore_ascii_case(name))
            {
                diag.push(
                    WarningKind::DuplicateSection,
                    alloc::format!("Section [{}] repeated at line {}, contents merged", name, line_no),
                );
                current = Some(pos);
            } else {
                sections.push(Section {
                    name: name.to_string(),
                    line: line_no,
                    pairs: Vec::new(),
                });
                current = Some(sections.len() - 1);
            }
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(malformed(line_no, raw));
        };
        let Some(section) = current.and_then(|pos| sections.get_mut(pos)) else {
            return Err(malformed(line_no, raw));
        };
        section.set(
            KeyValue {
                key: key.trim().to_string(),
                value: value.trim().to_string(),
                line: line_no,
            },
            diag,
        );
    }

    Ok(sections)
}

/// Returns the uncommented line when a comment holds one of the custom keys.
fn commented_key(comment: &str) -> Option<&str> {
    let comment = comment.trim();
    let key = comment.split_once('=').map(|(k, _)| k.trim())?;
    COMMENTED_KEYS
        .iter()
        .any(|k| k.eq_ignore_ascii_case(key))
        .then_some(comment)
}

fn malformed(line: usize, content: &str) -> OdError {
    OdError::MalformedSection {
        line,
        content: content.trim().to_string(),
    }
}
