use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::FinalResult;

/// Pretty-printed artifact text, 2-space indent with a trailing newline.
pub fn render_result(result: &FinalResult) -> Result<String> {
    let content = serde_json::to_string_pretty(result).context("Failed to serialize JSON")?;
    Ok(format!("{}\n", content))
}

/// Write the artifact next to `path` and rename it into place.
///
/// Readers never observe a half-written file.
pub fn write_result(path: &Path, result: &FinalResult) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = render_result(result)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content)
        .with_context(|| format!("Failed to write file: {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace file: {}", path.display()))?;
    Ok(())
}
