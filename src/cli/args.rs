//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Analyze the project and write the permission artifact
//! - `init`: Create a `.codeauthrc.json` with the default configuration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Scan(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by analysis commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory (default: current directory)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Artifact path (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Translation table used to resolve labels (overrides config file)
    #[arg(long)]
    pub messages: Option<PathBuf>,

    /// Print the artifact to stdout instead of writing it
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Derive per-page permission codes and write them as JSON
    Scan(ScanCommand),
    /// Initialize a new .codeauthrc.json configuration file
    Init,
}
