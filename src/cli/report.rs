//! Terminal output for command results.
//!
//! Diagnostics always go to stderr so `scan --stdout` can be piped straight
//! into another tool.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, InitSummary, ScanOutput, ScanSummary};
use crate::config::CONFIG_FILE_NAME;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Scan(summary) => {
            print_scan_to(
                summary,
                verbose,
                &mut io::stdout().lock(),
                &mut io::stderr().lock(),
            );
        }
        CommandSummary::Init(summary) => print_init(summary),
    }
}

/// Print a scan summary. The artifact (for `--stdout`) and the success line
/// go to `out`; warnings and errors go to `err`.
pub fn print_scan_to<O: Write, E: Write>(
    summary: &ScanSummary,
    verbose: bool,
    out: &mut O,
    err: &mut E,
) {
    print_warnings_to(summary, verbose, err);

    for e in &summary.parse_errors {
        let _ = writeln!(err, "{} {}", "error:".bold().red(), e);
    }

    let status_line = match &summary.output {
        ScanOutput::Stdout(json) => {
            let _ = write!(out, "{}", json);
            None
        }
        ScanOutput::File(path) => Some(format!("wrote {}", path.display())),
    };

    // Keep stdout clean when it carries the artifact.
    let summary_writer: &mut dyn Write = if status_line.is_some() { out } else { err };

    if summary.parse_errors.is_empty() {
        let _ = writeln!(
            summary_writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Scanned {} source {} - {} {}, {} {}",
                summary.files_scanned,
                plural(summary.files_scanned, "file", "files"),
                summary.page_count(),
                plural(summary.page_count(), "page", "pages"),
                summary.code_count(),
                plural(summary.code_count(), "code", "codes"),
            )
            .green()
        );
    } else {
        let _ = writeln!(
            summary_writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "Scanned {} source {} - {} could not be parsed, {} {} written",
                summary.files_scanned,
                plural(summary.files_scanned, "file", "files"),
                summary.parse_errors.len(),
                summary.page_count(),
                plural(summary.page_count(), "page", "pages"),
            )
            .red()
        );
    }

    if let Some(line) = status_line {
        let _ = writeln!(summary_writer, "  {} {}", "-->".blue(), line);
    }
}

fn print_warnings_to<W: Write>(summary: &ScanSummary, verbose: bool, writer: &mut W) {
    if verbose && summary.default_config {
        let _ = writeln!(
            writer,
            "Note: No {} found, using default configuration",
            CONFIG_FILE_NAME
        );
    }

    if let Some(warning) = &summary.message_warning {
        let _ = writeln!(
            writer,
            "{} Translation table not loaded, labels fall back to their keys: {}",
            "warning:".bold().yellow(),
            warning.error
        );
    }

    for cycle in &summary.label_warnings {
        let _ = writeln!(writer, "{} {}", "warning:".bold().yellow(), cycle);
    }

    if summary.skipped_count > 0 {
        let _ = writeln!(
            writer,
            "{} {} path(s) skipped due to access errors{}",
            "warning:".bold().yellow(),
            summary.skipped_count,
            if verbose { "" } else { " (use -v for details)" }
        );
    }
}

fn print_init(summary: &InitSummary) {
    match &summary.error {
        None => println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        ),
        Some(error) => eprintln!("{} {}", "error:".bold().red(), error),
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
