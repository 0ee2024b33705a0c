//! Translation label resolution.
//!
//! Labels in source are usually translation keys (`i18n.t('user.add')`).
//! This module looks them up in a nested message table and expands chained
//! references of the form `@:dotted.key`:
//!
//! ```json
//! { "cancel": "Cancel", "all": "All", "cancelAll": "@:cancel@:all" }
//! ```
//!
//! `resolve("cancelAll")` yields `"CancelAll"`. A table whose references
//! loop back onto themselves produces a [`LabelCycleError`].

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::core::LabelCycleError;

/// Prefix of a chained reference inside a message value.
pub const REFERENCE_MARKER: &str = "@:";

/// Upper bound on whole-string substitution passes for a single key.
const MAX_SUBSTITUTION_PASSES: usize = 64;

static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@:([A-Za-z0-9_.\-]+)").expect("reference pattern is valid"));

/// Nested message table: string leaves or nested objects.
pub type MessageTable = Map<String, Value>;

#[derive(Debug, Clone, Default)]
pub struct LabelResolver {
    messages: MessageTable,
}

impl LabelResolver {
    pub fn new(messages: MessageTable) -> Self {
        Self { messages }
    }

    /// Resolve a translation key (or a string containing references) to display text.
    ///
    /// A key without references is looked up directly and falls back to itself
    /// when missing.
    pub fn resolve(&self, key: &str) -> Result<String, LabelCycleError> {
        let mut visiting = Vec::new();
        self.resolve_text(key, key, &mut visiting)
    }

    fn resolve_text(
        &self,
        origin: &str,
        text: &str,
        visiting: &mut Vec<String>,
    ) -> Result<String, LabelCycleError> {
        if !text.contains(REFERENCE_MARKER) {
            return self.lookup(origin, text, visiting);
        }

        let mut current = text.to_string();
        for _ in 0..MAX_SUBSTITUTION_PASSES {
            let next = self.substitute(origin, &current, visiting)?;
            if next == current {
                return Ok(next);
            }
            current = next;
        }

        let mut chain = visiting.clone();
        chain.push(current);
        Err(LabelCycleError {
            key: origin.to_string(),
            chain,
        })
    }

    /// Replace every `@:path` occurrence in `text` with its resolved value.
    fn substitute(
        &self,
        origin: &str,
        text: &str,
        visiting: &mut Vec<String>,
    ) -> Result<String, LabelCycleError> {
        let mut result = String::with_capacity(text.len());
        let mut last_end = 0;
        for caps in REFERENCE_RE.captures_iter(text) {
            let (Some(whole), Some(path)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            result.push_str(&text[last_end..whole.start()]);
            result.push_str(&self.lookup(origin, path.as_str().trim(), visiting)?);
            last_end = whole.end();
        }
        result.push_str(&text[last_end..]);
        Ok(result)
    }

    fn lookup(
        &self,
        origin: &str,
        path: &str,
        visiting: &mut Vec<String>,
    ) -> Result<String, LabelCycleError> {
        let value = self.get(path).unwrap_or(path);
        if !value.contains(REFERENCE_MARKER) {
            return Ok(value.to_string());
        }

        if visiting.iter().any(|key| key == path) {
            let mut chain = visiting.clone();
            chain.push(path.to_string());
            return Err(LabelCycleError {
                key: origin.to_string(),
                chain,
            });
        }

        visiting.push(path.to_string());
        let resolved = self.resolve_text(origin, value, visiting);
        visiting.pop();
        resolved
    }

    /// Walk a dotted path. Nested tables and empty strings count as missing.
    fn get(&self, path: &str) -> Option<&str> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut value = self.messages.get(first)?;
        for segment in segments {
            value = value.as_object()?.get(segment)?;
        }
        value.as_str().filter(|s| !s.is_empty())
    }
}
