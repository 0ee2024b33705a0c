//! Analysis engine.
//!
//! Leaves first:
//!
//! - [`resolve`]: import specifier → canonical file id
//! - [`labels`]: translation key → display text, with `@:key` chains
//! - [`extract`]: codes, labels and dependency edges of one file
//! - [`route`]: route metadata of one component
//! - [`aggregate`]: page → merged codes over the dependency closure
//!
//! [`context`] drives a full project scan on top of these.

pub mod aggregate;
pub mod context;
pub mod error;
pub mod extract;
pub mod file_scanner;
pub mod labels;
pub mod output;
pub mod parsers;
pub mod resolve;
pub mod route;
pub mod types;

pub use aggregate::aggregate;
pub use context::{CodeScanner, ScanContext, ScanReport};
pub use error::{FileParseError, LabelCycleError};
pub use extract::{FileExtraction, SourceExtractor};
pub use labels::{LabelResolver, MessageTable};
pub use resolve::ModuleResolver;
pub use route::extract_route;
pub use types::*;
