//! Common utility functions shared across the codebase.

use std::path::{Component, Path, PathBuf};

/// Lexically normalizes a path: drops `.` segments and folds `..` into
/// the preceding segment. The filesystem is never consulted, so symlinks
/// are left as written.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use codeauth::utils::normalize_path;
///
/// assert_eq!(
///     normalize_path(Path::new("/project/src/./views/../utils/index.ts")),
///     PathBuf::from("/project/src/utils/index.ts")
/// );
/// assert_eq!(normalize_path(Path::new("/../a")), PathBuf::from("/a"));
/// assert_eq!(normalize_path(Path::new("a/../../b")), PathBuf::from("../b"));
/// ```
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let last = normalized.components().next_back();
                match last {
                    Some(Component::Normal(_)) => {
                        normalized.pop();
                    }
                    Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                    _ => normalized.push(".."),
                }
            }
            Component::Normal(segment) => normalized.push(segment),
        }
    }
    normalized
}

/// Converts a path into the string form used as a file id.
pub fn path_to_id(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// Resolves `path` against `base` unless it is already absolute, then normalizes.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&base.join(path))
    }
}
