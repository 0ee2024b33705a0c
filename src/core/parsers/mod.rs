//! File parsers for source code and translation tables.
//!
//! - `json`: translation table loader (nested message JSON)
//! - `script`: JS/TS/JSX/TSX parsing via swc
//! - `sfc`: Vue single-file-component script block splitting

pub mod json;
pub mod script;
pub mod sfc;
