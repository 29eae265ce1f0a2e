// Resolver module: header-drift tolerant field lookup over loosely keyed records.

pub mod fields;

use crate::model::Record;
use regex::{Regex, RegexBuilder};
use serde_json::Value;

/// A single way of locating a field: an exact header or a pattern over normalized headers.
#[derive(Debug, Clone)]
pub enum Candidate {
    Exact(String),
    Pattern(Regex),
}

impl Candidate {
    pub fn exact(name: &str) -> Self {
        Candidate::Exact(name.to_string())
    }

    /// Case-insensitive pattern. Panics on an invalid pattern, which only
    /// ever comes from the static catalog in `fields`.
    pub fn pattern(pattern: &str) -> Self {
        let re = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .unwrap_or_else(|e| panic!("invalid field pattern {:?}: {}", pattern, e));
        Candidate::Pattern(re)
    }
}

/// Ordered candidate list. Exact names are tried before any pattern.
#[derive(Debug, Clone)]
pub struct FieldQuery {
    candidates: Vec<Candidate>,
}

impl FieldQuery {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        debug_assert!(!candidates.is_empty(), "a field query needs at least one candidate");
        Self { candidates }
    }
}

/// Text form of a record value. Objects have no sensible text form and read as empty.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => String::new(),
    }
}

fn non_empty(value: &Value) -> Option<String> {
    let text = value_text(value);
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Returns the first non-empty value matched by `query`, trimmed, or an empty string.
pub fn resolve(record: &Record, query: &FieldQuery) -> String {
    for candidate in &query.candidates {
        if let Candidate::Exact(name) = candidate {
            if let Some(found) = record.get(name).and_then(non_empty) {
                return found;
            }
        }
    }

    for candidate in &query.candidates {
        let Candidate::Pattern(re) = candidate else { continue };
        let hit = record
            .iter()
            .find(|(key, _)| re.is_match(&key.trim().to_lowercase()));
        if let Some(found) = hit.and_then(|(_, value)| non_empty(value)) {
            return found;
        }
    }

    String::new()
}
