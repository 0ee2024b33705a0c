use std::path::PathBuf;

use crate::core::{FileParseError, FinalResult, LabelCycleError, parsers::json::MessageLoadWarning};

#[derive(Debug)]
pub enum CommandSummary {
    Scan(ScanSummary),
    Init(InitSummary),
}

/// Where the artifact went.
#[derive(Debug)]
pub enum ScanOutput {
    File(PathBuf),
    Stdout(String),
}

#[derive(Debug)]
pub struct ScanSummary {
    pub files_scanned: usize,
    pub result: FinalResult,
    pub output: ScanOutput,
    pub parse_errors: Vec<FileParseError>,
    pub label_warnings: Vec<LabelCycleError>,
    pub message_warning: Option<MessageLoadWarning>,
    pub skipped_count: usize,
    /// True when no `.codeauthrc.json` was found.
    pub default_config: bool,
}

impl ScanSummary {
    pub fn page_count(&self) -> usize {
        self.result.len()
    }

    /// Distinct codes across all pages.
    pub fn code_count(&self) -> usize {
        let mut codes: Vec<&str> = self
            .result
            .values()
            .flat_map(|page| page.code_items.iter().map(|item| item.code.as_str()))
            .collect();
        codes.sort_unstable();
        codes.dedup();
        codes.len()
    }
}

#[derive(Debug)]
pub struct InitSummary {
    /// Set when the config file could not be created.
    pub error: Option<String>,
}

/// Result of running a codeauth command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
}
