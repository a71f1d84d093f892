//! AI-Hub downloader - a client for the AI-Hub dataset API.
//!
//! This library provides:
//!
//! - An authenticated HTTP client for listing and inspecting datasets
//! - A fetch, extract and merge pipeline that streams dataset archives,
//!   unpacks them and reassembles split `.part` files
//! - A registry of named tools and a line-delimited JSON-RPC server over it
//!
//! # Example
//!
//! ```no_run
//! use aihub_downloader::{AihubClient, ClientConfig, DownloadRequest, FileSelector};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AihubClient::new(ClientConfig::new("my-api-key"))?;
//!
//!     let request = DownloadRequest::new("71265")
//!         .file_keys(FileSelector::parse_list("66065, 66066"))
//!         .output_dir("./data");
//!     let result = client.download_dataset(&request).await?;
//!
//!     println!("{} files extracted", result.extracted_files.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod output;
pub mod protocol;
pub mod tools;

// Re-exports for convenience
pub use api::{AihubClient, ClientConfig};
pub use config::Config;
pub use download::{DownloadRequest, DownloadResult, FileSelector};
pub use error::{Error, ErrorKind, Result};
pub use protocol::McpServer;
pub use tools::{ToolKind, ToolRegistry};
