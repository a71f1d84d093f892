//! Rendering of query payloads and download results.

use console::style;
use indicatif::HumanBytes;

use crate::api::ApiPayload;
use crate::download::DownloadResult;

/// Characters of raw response text shown before truncating.
pub const RAW_DISPLAY_LIMIT: usize = 1000;

/// Characters of pretty-printed JSON shown before truncating.
pub const JSON_DISPLAY_LIMIT: usize = 1500;

/// Extracted files listed by name before summarising the rest.
pub const FILE_LIST_LIMIT: usize = 10;

/// Cut `text` to at most `limit` characters. The flag reports whether anything was cut.
fn truncate_chars(text: &str, limit: usize) -> (&str, bool) {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => (&text[..idx], true),
        None => (text, false),
    }
}

/// Display form of a payload, truncated for the terminal.
pub fn format_payload(payload: &ApiPayload) -> String {
    let (text, limit) = match payload {
        ApiPayload::Raw { raw_response } => (raw_response.clone(), RAW_DISPLAY_LIMIT),
        ApiPayload::Json(value) => (
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
            JSON_DISPLAY_LIMIT,
        ),
    };

    let (shown, truncated) = truncate_chars(&text, limit);
    if truncated {
        format!("{}\n... (truncated, {} characters total)", shown, text.chars().count())
    } else {
        shown.to_string()
    }
}

pub fn print_payload(title: &str, payload: &ApiPayload) {
    println!();
    println!("{}", style(title).bold());
    println!("{}", format_payload(payload));
}

/// Lines describing a finished download.
pub fn download_summary(result: &DownloadResult) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Downloaded: {} ({} bytes)",
            HumanBytes(result.downloaded_size),
            result.downloaded_size
        ),
        format!("Saved to:   {}", result.output_path.display()),
        format!("Files:      {}", result.extracted_files.len()),
    ];

    for path in result.extracted_files.iter().take(FILE_LIST_LIMIT) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        lines.push(format!("  - {}", name));
    }

    if result.extracted_files.len() > FILE_LIST_LIMIT {
        lines.push(format!(
            "  ... and {} more",
            result.extracted_files.len() - FILE_LIST_LIMIT
        ));
    }

    lines
}

pub fn print_download_result(result: &DownloadResult) {
    println!();
    println!("{} {}", style("OK").green().bold(), result.message);
    for line in download_summary(result) {
        println!("  {}", line);
    }
}
