use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::core::labels::MessageTable;

/// A warning from loading the translation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLoadWarning {
    pub file_path: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct LoadMessagesResult {
    pub messages: MessageTable,
    pub warning: Option<MessageLoadWarning>,
}

/// Read and parse a nested translation table.
pub fn parse_message_file(path: &Path) -> Result<MessageTable> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;

    let json: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {:?}", path))?;

    match json {
        Value::Object(map) => Ok(map),
        _ => bail!("Root of translation table must be an object: {:?}", path),
    }
}

/// Load the translation table, degrading to an empty table on any failure.
///
/// Labels then resolve to their raw keys, which keeps the scan usable when a
/// project has no locale file.
pub fn load_message_table(path: &Path) -> LoadMessagesResult {
    match parse_message_file(path) {
        Ok(messages) => LoadMessagesResult {
            messages,
            warning: None,
        },
        Err(e) => LoadMessagesResult {
            messages: MessageTable::new(),
            warning: Some(MessageLoadWarning {
                file_path: path.to_string_lossy().to_string(),
                error: format!("{:#}", e),
            }),
        },
    }
}
