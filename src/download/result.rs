//! Outcome of one pipeline run.

use std::path::PathBuf;

use serde::Serialize;

/// Terminal output of a download. Built once, never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadResult {
    pub success: bool,
    pub dataset_key: String,
    /// Resolved `fileSn` selector.
    pub file_keys: String,
    /// Bytes received from the server.
    pub downloaded_size: u64,
    pub output_path: PathBuf,
    /// Produced paths in archive order, or the kept archive.
    pub extracted_files: Vec<PathBuf>,
    pub message: String,
}

impl DownloadResult {
    pub(crate) fn completed(
        dataset_key: &str,
        file_keys: String,
        downloaded_size: u64,
        output_path: PathBuf,
        extracted_files: Vec<PathBuf>,
    ) -> Self {
        Self {
            success: true,
            dataset_key: dataset_key.to_string(),
            file_keys,
            downloaded_size,
            output_path,
            extracted_files,
            message: format!("Dataset '{}' downloaded", dataset_key),
        }
    }
}
