use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use super::{CommandResult, CommandSummary, ScanOutput, ScanSummary};
use crate::{
    cli::args::ScanCommand,
    config::load_config,
    core::{
        CodeScanner,
        output::{render_result, write_result},
    },
    utils::{absolutize, path_to_id},
};

pub fn scan(cmd: ScanCommand) -> Result<CommandResult> {
    let verbose = cmd.common.verbose;
    let cwd = std::env::current_dir().context("Failed to read current directory")?;

    // Priority: CLI --source-root arg > current directory
    let root_dir = absolutize(&cwd, &cmd.common.source_root.unwrap_or_else(|| PathBuf::from(".")));
    if !root_dir.is_dir() {
        bail!("Source root is not a directory: {}", root_dir.display());
    }

    let config_result = load_config(&root_dir)?;

    // CLI > config file > defaults. CLI paths are taken from the working directory.
    let mut config = config_result.config;
    if let Some(output) = &cmd.output {
        config.output_file = path_to_id(&absolutize(&cwd, output));
    }
    if let Some(messages) = &cmd.messages {
        config.messages_file = path_to_id(&absolutize(&cwd, messages));
    }

    let output_path = config.output_path(&root_dir);
    let mut scanner = CodeScanner::new(config, &root_dir, verbose)?;
    let message_warning = scanner.message_warning().cloned();
    let report = scanner.scan();

    let output = if cmd.stdout {
        ScanOutput::Stdout(render_result(&report.result)?)
    } else {
        write_result(&output_path, &report.result)?;
        ScanOutput::File(output_path)
    };

    let error_count = report.parse_errors.len();
    Ok(CommandResult {
        summary: CommandSummary::Scan(ScanSummary {
            files_scanned: report.files_scanned,
            result: report.result,
            output,
            parse_errors: report.parse_errors,
            label_warnings: report.label_warnings,
            message_warning,
            skipped_count: report.skipped_count,
            default_config: !config_result.from_file,
        }),
        error_count,
    })
}
