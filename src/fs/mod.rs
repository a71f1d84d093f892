//! Filesystem module.
//!
//! Provides:
//! - Output directory resolution
//! - Filename sanitization and part-name parsing

pub mod naming;
pub mod paths;

pub use naming::{archive_file_name, sanitize_filename, split_part_name, PART_DELIMITER};
pub use paths::{ensure_dir, resolve_output_dir};
