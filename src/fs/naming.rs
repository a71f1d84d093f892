//! Filename generation and part-name parsing.

use crate::error::{Error, Result};

/// Delimiter between a base name and its part number.
pub const PART_DELIMITER: &str = ".part";

/// Validate and sanitize a filename by removing or replacing invalid characters.
///
/// Returns an error if the filename contains path traversal patterns.
pub fn sanitize_filename(name: &str) -> Result<String> {
    // Reject path traversal attempts
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Name of the archive kept when a download is not extracted.
pub fn archive_file_name(dataset_key: &str) -> Result<String> {
    Ok(format!("{}.tar", sanitize_filename(dataset_key)?))
}

/// Split a fragment file name into its base name and part number.
///
/// Returns `None` when the name does not contain `.part`. The base is everything
/// before the first `.part`; the number is the text between the first and any
/// second `.part`. A missing, non-numeric or overflowing number counts as part 0.
pub fn split_part_name(name: &str) -> Option<(&str, u64)> {
    let (base, rest) = name.split_once(PART_DELIMITER)?;
    let digits = rest.split(PART_DELIMITER).next().unwrap_or("");

    let number = if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse().unwrap_or(0)
    } else {
        0
    };

    Some((base, number))
}
