//! Console output utilities.

use console::style;

use crate::api::ClientConfig;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     AI-Hub Downloader                                 ║
║     Dataset query and download tool                   ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary. The API key is masked.
pub fn print_config_summary(config: &ClientConfig) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  API key: {}", mask_api_key(&config.api_key));
    println!("  Base URL: {}", config.base_url);
    println!("  Timeout: {}s", config.timeout.as_secs());
    println!("  Directory: {}", config.download_dir.display());
    println!();
}

/// First eight characters of the key followed by an ellipsis.
pub fn mask_api_key(api_key: &str) -> String {
    let prefix: String = api_key.chars().take(8).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("0123456789abcdef"), "01234567...");
        assert_eq!(mask_api_key("abc"), "abc...");
        assert_eq!(mask_api_key("가나다라마바사아자차"), "가나다라마바사아...");
    }
}
