//! AI-Hub API module.
//!
//! This module provides:
//! - HTTP client configuration
//! - Endpoint resolution
//! - Authenticated query and download requests
//! - API response types

pub mod client;
pub mod config;
pub mod endpoints;
pub mod types;

pub use client::AihubClient;
pub use config::ClientConfig;
pub use endpoints::Endpoints;
pub use types::ApiPayload;
