//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Progress bars
//! - Rendering of query payloads and download results

pub mod console;
pub mod progress;
pub mod report;

pub use console::{
    mask_api_key, print_banner, print_config_summary, print_error, print_info, print_success,
    print_warning,
};
pub use progress::{create_download_bar, create_spinner};
pub use report::{format_payload, print_download_result, print_payload};
