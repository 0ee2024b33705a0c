use std::process::ExitCode;

use clap::Parser;
use codeauth::cli::{Arguments, ExitStatus};
use colored::Colorize;

fn main() -> ExitCode {
    let args = Arguments::parse();

    match codeauth::cli::run_cli(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "error:".bold().red(), err);
            ExitStatus::Error.into()
        }
    }
}
