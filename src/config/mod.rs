//! Configuration module for the aihub-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Reading environment overrides
//! - Configuration validation

pub mod env;
pub mod loader;
pub mod validation;

pub use env::{write_env_template, EnvOverrides};
pub use loader::{ApiConfig, Config, DownloadConfig};
pub use validation::{validate_api_key, validate_config, validate_dataset_key};
