//! Shared data model for a scan.
//!
//! Every per-file map is keyed by a canonical file id: an absolute,
//! lexically normalized path string produced by `ModuleResolver` or the
//! scan driver. Maps are `IndexMap`s so iteration follows insertion order,
//! which keeps the final artifact stable across repeated scans.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Absolute, normalized path identifying one source file.
pub type FileId = String;

/// A declared permission requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeItem {
    /// Unique feature identifier (e.g. `"user-add"`).
    pub code: String,
    /// Final display text, never a raw translation reference.
    pub label: String,
}

impl CodeItem {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

/// Route identity of a page, read from `export const route = { ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteItem {
    pub name: String,
    pub path: String,
    pub label: String,
}

impl RouteItem {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            label: label.into(),
        }
    }

    /// A route with all three fields empty marks a non-routable component.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.path.is_empty() && self.label.is_empty()
    }
}

/// Output entry for one routable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCodeAuths {
    pub route_item: RouteItem,
    pub code_items: Vec<CodeItem>,
}

/// Codes declared directly in each file.
pub type CodeItemsByFile = IndexMap<FileId, Vec<CodeItem>>;

/// Direct import/require targets of each file, in discovery order.
pub type DependencyGraph = IndexMap<FileId, Vec<FileId>>;

/// Route metadata of each component that declares one.
pub type RoutesByFile = IndexMap<FileId, RouteItem>;

/// Page file → route + merged codes. This is what gets written to disk.
pub type FinalResult = IndexMap<FileId, PageCodeAuths>;
