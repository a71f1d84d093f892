//! Uniform result envelope returned by every tool call.

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, ErrorKind};
use crate::tools::kind::ToolKind;

/// Failure category reported to tool callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorType {
    UnknownTool,
    MissingParameter,
    AuthenticationError,
    ApiError,
    UnexpectedError,
}

impl From<ErrorKind> for ToolErrorType {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Authentication => ToolErrorType::AuthenticationError,
            ErrorKind::Api | ErrorKind::Pipeline => ToolErrorType::ApiError,
            ErrorKind::Configuration | ErrorKind::Internal => ToolErrorType::UnexpectedError,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ToolErrorType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
}

impl ToolEnvelope {
    pub fn success(tool: ToolKind, data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            error_type: None,
            dataset_key: None,
            tool: Some(tool.name().to_string()),
        }
    }

    pub fn with_dataset_key(mut self, dataset_key: impl Into<String>) -> Self {
        self.dataset_key = Some(dataset_key.into());
        self
    }

    pub fn failure(error_type: ToolErrorType, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            error_type: Some(error_type),
            dataset_key: None,
            tool: None,
        }
    }

    pub fn missing_parameter(name: &str) -> Self {
        Self::failure(
            ToolErrorType::MissingParameter,
            format!("{} parameter is required", name),
        )
    }

    pub fn from_error(err: &Error) -> Self {
        let error_type = if err.is_authentication() {
            ToolErrorType::AuthenticationError
        } else {
            err.kind().into()
        };
        Self::failure(error_type, err.to_string())
    }
}
