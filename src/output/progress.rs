//! Spinners and transfer bars.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
const TRANSFER_TEMPLATE: &str =
    "{spinner:.green} {msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

/// Spinner shown while waiting on a query.
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Byte bar for an archive transfer of `total` bytes.
pub fn create_download_bar(total: u64, message: &str) -> ProgressBar {
    let style = ProgressStyle::with_template(TRANSFER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");

    let bar = ProgressBar::new(total);
    bar.set_style(style);
    bar.set_message(message.to_string());
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_parse() {
        assert!(ProgressStyle::with_template(SPINNER_TEMPLATE).is_ok());
        assert!(ProgressStyle::with_template(TRANSFER_TEMPLATE).is_ok());
    }

    #[test]
    fn test_download_bar_tracks_bytes() {
        let bar = create_download_bar(100, "Downloading 1");
        bar.inc(40);
        assert_eq!(bar.position(), 40);
        assert_eq!(bar.length(), Some(100));
        assert_eq!(bar.message(), "Downloading 1");
    }
}
