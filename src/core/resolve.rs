//! Module specifier resolution.
//!
//! Turns a raw import/require specifier into a canonical file id, emulating
//! the bundler rules a Vue/TypeScript project relies on:
//!
//! - `./x`, `../x` → relative to the importing file's directory
//! - `/abs/x` → absolute path
//! - `@/x` (any configured alias prefix followed by `/`) → alias target directory
//! - anything else → package under `<root>/node_modules` (no ascent)
//!
//! Relative, absolute and alias targets are probed as the exact path, then
//! with each of [`EXTENSIONS`] appended, then as a directory containing
//! `index` + extension. Alias and package results are memoized per
//! specifier until [`ModuleResolver::clear_cache`] is called.

use std::{
    collections::HashMap,
    ffi::OsString,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::config::{AliasConfig, Config};
use crate::core::FileId;
use crate::utils::{absolutize, normalize_path, path_to_id};

/// Extensions probed after the exact path, in priority order.
pub const EXTENSIONS: [&str; 5] = [".ts", ".tsx", ".js", ".jsx", ".vue"];

/// Directory holding external packages, relative to the project root.
const PACKAGES_DIR: &str = "node_modules";

/// An alias with its target already resolved to an absolute directory.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedAlias {
    prefix: String,
    target: PathBuf,
}

/// How a specifier is looked up. First match wins, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecifierKind<'a> {
    Relative,
    Absolute,
    Alias(&'a ResolvedAlias),
    Package,
}

/// Resolution service owned by one scan.
///
/// Resolution is a pure function of the base path, the specifier, the
/// configuration and the filesystem. The cache only remembers alias and
/// package lookups; it is safe to share across threads, and two threads
/// racing on the same key just compute the same value twice.
#[derive(Debug)]
pub struct ModuleResolver {
    aliases: Vec<ResolvedAlias>,
    ignore_files: Vec<String>,
    packages_dir: PathBuf,
    cache: Mutex<HashMap<String, Option<FileId>>>,
}

impl ModuleResolver {
    pub fn new(root_dir: &Path, aliases: &[AliasConfig], ignore_files: &[String]) -> Self {
        let root_dir = normalize_path(root_dir);
        let aliases = aliases
            .iter()
            .map(|alias| ResolvedAlias {
                prefix: alias.prefix.clone(),
                target: absolutize(&root_dir, Path::new(&alias.target)),
            })
            .collect();

        Self {
            aliases,
            ignore_files: ignore_files.to_vec(),
            packages_dir: root_dir.join(PACKAGES_DIR),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &Config, root_dir: &Path) -> Self {
        Self::new(root_dir, &config.aliases, &config.ignore_files)
    }

    /// Resolve `specifier` as imported from the file at `base_path`.
    ///
    /// Returns `None` when nothing matches or when the resolved path contains
    /// one of the configured ignored substrings.
    pub fn resolve(&self, base_path: &Path, specifier: &str) -> Option<FileId> {
        let resolved = match self.classify(specifier) {
            SpecifierKind::Relative => {
                let base_dir = base_path.parent()?;
                try_extensions(&normalize_path(&base_dir.join(specifier))).map(|p| path_to_id(&p))
            }
            SpecifierKind::Absolute => {
                try_extensions(&normalize_path(Path::new(specifier))).map(|p| path_to_id(&p))
            }
            SpecifierKind::Alias(alias) => self.cached(specifier, || {
                let rest = &specifier[alias.prefix.len() + 1..];
                try_extensions(&normalize_path(&alias.target.join(rest.trim_start_matches('/'))))
            }),
            SpecifierKind::Package => self.cached(specifier, || {
                let module_path = normalize_path(&self.packages_dir.join(specifier));
                module_path.exists().then_some(module_path)
            }),
        }?;

        if self
            .ignore_files
            .iter()
            .any(|ignored| resolved.contains(ignored.as_str()))
        {
            return None;
        }
        Some(resolved)
    }

    /// Forget every memoized alias and package lookup.
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }

    fn classify(&self, specifier: &str) -> SpecifierKind<'_> {
        if specifier.starts_with("./") || specifier.starts_with("../") {
            return SpecifierKind::Relative;
        }
        if Path::new(specifier).is_absolute() {
            return SpecifierKind::Absolute;
        }
        if let Some(alias) = self.aliases.iter().find(|alias| {
            specifier
                .strip_prefix(alias.prefix.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
        }) {
            return SpecifierKind::Alias(alias);
        }
        SpecifierKind::Package
    }

    fn cached<F>(&self, specifier: &str, compute: F) -> Option<FileId>
    where
        F: FnOnce() -> Option<PathBuf>,
    {
        if let Some(hit) = self
            .cache
            .lock()
            .ok()
            .and_then(|cache| cache.get(specifier).cloned())
        {
            return hit;
        }

        let result = compute().map(|path| path_to_id(&path));
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(specifier.to_string(), result.clone());
        }
        result
    }
}

/// Probe `path` as-is, with each extension appended, then as a directory index.
fn try_extensions(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }

    for ext in EXTENSIONS {
        let mut with_ext = OsString::from(path.as_os_str());
        with_ext.push(ext);
        let with_ext = PathBuf::from(with_ext);
        if with_ext.is_file() {
            return Some(with_ext);
        }
    }

    if path.is_dir() {
        for ext in EXTENSIONS {
            let index_path = path.join(format!("index{}", ext));
            if index_path.is_file() {
                return Some(index_path);
            }
        }
    }

    None
}
