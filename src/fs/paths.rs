//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Pick the explicit output directory if one was given, otherwise the default.
pub fn resolve_output_dir(explicit: Option<&Path>, default: &Path) -> PathBuf {
    explicit.unwrap_or(default).to_path_buf()
}

/// Ensure a directory exists, creating it and any missing parents.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
