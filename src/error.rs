//! Error types for the aihub-downloader application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // API errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("API request failed: HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("API error: request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("API error: network connection failure")]
    ConnectionFailed,

    // Download pipeline errors
    #[error("Transfer failed: {0}")]
    Transfer(String),

    #[error("Archive extraction failed: {0}")]
    Extraction(String),

    #[error("Download of dataset '{dataset_key}' failed: {source}")]
    Pipeline {
        dataset_key: String,
        #[source]
        source: Box<Error>,
    },

    // File system errors
    #[error("Invalid filename (path traversal attempt): {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Coarse classification used by front ends to pick a reaction to a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Authentication,
    Api,
    Pipeline,
    Internal,
}

impl Error {
    /// Wrap a failure that happened while running the download pipeline.
    pub fn pipeline(dataset_key: impl Into<String>, source: Error) -> Self {
        Error::Pipeline {
            dataset_key: dataset_key.into(),
            source: Box::new(source),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) | Error::ConfigValidation { .. } | Error::MissingConfig(_) => {
                ErrorKind::Configuration
            }
            Error::Authentication(_) => ErrorKind::Authentication,
            Error::Api(_)
            | Error::HttpStatus { .. }
            | Error::Timeout { .. }
            | Error::ConnectionFailed => ErrorKind::Api,
            Error::Transfer(_) | Error::Extraction(_) | Error::Pipeline { .. } => {
                ErrorKind::Pipeline
            }
            Error::InvalidFilename(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::UrlParse(_) => ErrorKind::Internal,
        }
    }

    /// True when the credential itself was rejected, even if the rejection
    /// surfaced in the middle of a download.
    pub fn is_authentication(&self) -> bool {
        match self {
            Error::Authentication(_) => true,
            Error::Pipeline { source, .. } => source.is_authentication(),
            _ => false,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Configuration => exit_codes::CONFIG_ERROR,
            ErrorKind::Authentication | ErrorKind::Api => exit_codes::API_ERROR,
            ErrorKind::Pipeline => exit_codes::DOWNLOAD_ERROR,
            ErrorKind::Internal => exit_codes::UNEXPECTED_ERROR,
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const ABORT: i32 = 1;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
