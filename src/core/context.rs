//! Project-wide scan state and the driver that fills it.
//!
//! A scan runs in three steps:
//!
//! 1. **Enumerate** source files under the configured includes.
//! 2. **Extract** each file in parallel: read, split `.vue` components,
//!    parse with swc, collect codes, dependency edges and the route.
//! 3. **Aggregate** once every file is recorded.
//!
//! Extraction results are written into [`ScanContext`] sequentially in
//! enumeration order, so the artifact is identical across runs.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use rayon::prelude::*;

use crate::{
    config::Config,
    core::{
        CodeItem, CodeItemsByFile, DependencyGraph, FileId, FileParseError, FinalResult,
        LabelCycleError, LabelResolver, ModuleResolver, RouteItem, RoutesByFile,
        aggregate::aggregate,
        extract::{FileExtraction, SourceExtractor},
        file_scanner::scan_files,
        parsers::{
            json::{MessageLoadWarning, load_message_table},
            script::{ScriptKind, parse_script},
            sfc::split_sfc,
        },
        route::extract_route,
    },
    utils::{absolutize, path_to_id},
};

/// The three per-file maps the aggregator works from.
#[derive(Debug, Default, Clone)]
pub struct ScanContext {
    pub code_items: CodeItemsByFile,
    pub dependencies: DependencyGraph,
    pub routes: RoutesByFile,
}

impl ScanContext {
    pub fn reset(&mut self) {
        self.code_items.clear();
        self.dependencies.clear();
        self.routes.clear();
    }

    /// Store one file's contribution, replacing whatever it contributed before.
    pub fn record(
        &mut self,
        file_id: FileId,
        code_items: Vec<CodeItem>,
        dependencies: Vec<FileId>,
        route: Option<RouteItem>,
    ) {
        match route {
            Some(route) => {
                self.routes.insert(file_id.clone(), route);
            }
            None => {
                self.routes.shift_remove(&file_id);
            }
        }
        self.dependencies.insert(file_id.clone(), dependencies);
        self.code_items.insert(file_id, code_items);
    }

    /// Forget a file entirely.
    pub fn remove(&mut self, file_id: &str) {
        self.code_items.shift_remove(file_id);
        self.dependencies.shift_remove(file_id);
        self.routes.shift_remove(file_id);
    }

    pub fn aggregate(&self) -> FinalResult {
        aggregate(&self.code_items, &self.dependencies, &self.routes)
    }
}

/// Everything one file yields before it is recorded.
#[derive(Debug)]
struct FileOutcome {
    extraction: FileExtraction,
    route: Option<RouteItem>,
}

/// Result of a full project scan.
#[derive(Debug)]
pub struct ScanReport {
    pub result: FinalResult,
    pub files_scanned: usize,
    /// Files that could not be read or parsed. They contribute nothing.
    pub parse_errors: Vec<FileParseError>,
    /// Translation cycles; the affected labels fell back to their raw keys.
    pub label_warnings: Vec<LabelCycleError>,
    /// Paths the file walker could not access.
    pub skipped_count: usize,
}

impl ScanReport {
    pub fn has_parse_errors(&self) -> bool {
        !self.parse_errors.is_empty()
    }
}

/// Scan driver owning the configuration, the resolution and label services,
/// and the accumulated project state.
pub struct CodeScanner {
    config: Config,
    root_dir: PathBuf,
    resolver: ModuleResolver,
    labels: LabelResolver,
    message_warning: Option<MessageLoadWarning>,
    context: ScanContext,
    verbose: bool,
}

impl CodeScanner {
    /// Build a scanner for the project at `root_dir`.
    ///
    /// A missing or unreadable translation table is not an error: labels then
    /// resolve to their raw keys and [`message_warning`](Self::message_warning)
    /// describes what went wrong.
    pub fn new(config: Config, root_dir: &Path, verbose: bool) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        let root_dir = absolutize(&cwd, root_dir);

        let loaded = load_message_table(&config.messages_path(&root_dir));
        let resolver = ModuleResolver::from_config(&config, &root_dir);

        Ok(Self {
            config,
            root_dir,
            resolver,
            labels: LabelResolver::new(loaded.messages),
            message_warning: loaded.warning,
            context: ScanContext::default(),
            verbose,
        })
    }

    pub fn message_warning(&self) -> Option<&MessageLoadWarning> {
        self.message_warning.as_ref()
    }

    pub fn context(&self) -> &ScanContext {
        &self.context
    }

    /// Aggregate the current project state.
    pub fn result(&self) -> FinalResult {
        self.context.aggregate()
    }

    /// Scan the whole project from scratch.
    pub fn scan(&mut self) -> ScanReport {
        self.context.reset();
        self.resolver.clear_cache();

        let scanned = scan_files(
            &self.root_dir,
            &self.config.includes,
            &self.config.ignores,
            self.verbose,
        );

        let resolver = &self.resolver;
        let labels = &self.labels;
        // Parallel read + parse + extract, collected in enumeration order.
        let outcomes: Vec<_> = scanned
            .files
            .par_iter()
            .map(|path| {
                let outcome = std::fs::read_to_string(path)
                    .map_err(|e| {
                        FileParseError::new(path_to_id(path), format!("Failed to read file: {}", e))
                    })
                    .and_then(|text| analyze_source(path, text, resolver, labels));
                (path_to_id(path), outcome)
            })
            .collect();

        let mut parse_errors = Vec::new();
        let mut label_warnings = Vec::new();
        for (file_id, outcome) in outcomes {
            match outcome {
                Ok(outcome) => {
                    label_warnings.extend(outcome.extraction.label_warnings);
                    self.context.record(
                        file_id,
                        outcome.extraction.code_items,
                        outcome.extraction.dependencies,
                        outcome.route,
                    );
                }
                Err(e) => parse_errors.push(e),
            }
        }

        ScanReport {
            result: self.context.aggregate(),
            files_scanned: scanned.files.len(),
            parse_errors,
            label_warnings,
            skipped_count: scanned.skipped_count,
        }
    }

    /// Re-extract a single file from in-memory text.
    ///
    /// Replaces whatever the file contributed before. On a parse failure the
    /// file's previous entries are dropped. Relative paths are taken from the
    /// project root.
    pub fn process_source(
        &mut self,
        path: &Path,
        text: &str,
    ) -> Result<Vec<LabelCycleError>, FileParseError> {
        let path = absolutize(&self.root_dir, path);
        let file_id = path_to_id(&path);

        match analyze_source(&path, text.to_string(), &self.resolver, &self.labels) {
            Ok(outcome) => {
                self.context.record(
                    file_id,
                    outcome.extraction.code_items,
                    outcome.extraction.dependencies,
                    outcome.route,
                );
                Ok(outcome.extraction.label_warnings)
            }
            Err(e) => {
                self.context.remove(&file_id);
                Err(e)
            }
        }
    }
}

/// Parse and extract one file. `.vue` components also yield their route.
fn analyze_source(
    path: &Path,
    text: String,
    resolver: &ModuleResolver,
    labels: &LabelResolver,
) -> Result<FileOutcome, FileParseError> {
    let file_id = path_to_id(path);
    let is_component = path.extension().is_some_and(|ext| ext == "vue");

    let (code, kind) = if is_component {
        let sfc = split_sfc(&text);
        (sfc.content, sfc.kind)
    } else {
        (text, ScriptKind::from_path(path))
    };

    let parsed = parse_script(code, &file_id, kind)?;
    let route = if is_component {
        extract_route(&parsed.module)
    } else {
        None
    };
    let extraction = SourceExtractor::new(path, &parsed, resolver, labels).extract();

    Ok(FileOutcome { extraction, route })
}
