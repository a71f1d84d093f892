//! Download module for dataset archives.
//!
//! This module provides:
//! - Download requests and file selectors
//! - The fetch, extract and merge pipeline
//! - Tar unpacking
//! - Reassembly of split part files

pub mod extract;
pub mod merge;
pub mod pipeline;
pub mod request;
pub mod result;

pub use merge::{merge_part_files, MergedFile};
pub use request::{DownloadRequest, FileSelector, ALL_FILES};
pub use result::DownloadResult;
