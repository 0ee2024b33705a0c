//! codeauth - permission code analyzer for Vue/TypeScript projects
//!
//! codeauth statically derives, for every routable page, the permission codes
//! declared by the page and by everything it imports, each paired with its
//! display label and the page's route metadata.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, terminal report)
//! - `config`: `.codeauthrc.json` loading and validation
//! - `core`: Analysis engine (extraction, resolution, labels, aggregation)
//! - `utils`: Shared path helpers

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;
