use thiserror::Error;

/// A source file could not be parsed. The file contributes nothing to the scan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to parse {file_path}: {message}")]
pub struct FileParseError {
    pub file_path: String,
    pub message: String,
}

impl FileParseError {
    pub fn new(file_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            message: message.into(),
        }
    }
}

/// A translation reference chain loops back onto itself.
///
/// `chain` lists the keys visited in order, ending with the key that closed the loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Translation reference cycle while resolving \"{key}\": {}", .chain.join(" -> "))]
pub struct LabelCycleError {
    pub key: String,
    pub chain: Vec<String>,
}
