use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::CardResult;

/// Markdown pages written next to rendered cards.
pub mod markdown;

/// Write a markdown page into `dir`, creating it if needed.
pub fn write_page(dir: &Path, file_name: &str, contents: &str) -> CardResult<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("create directory '{}'", dir.display()))?;
    let path = dir.join(file_name);
    std::fs::write(&path, contents).with_context(|| format!("write '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "wrote report");
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/report/mod.rs"]
mod tests;
