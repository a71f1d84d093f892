//! API response type definitions.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Key wrapping a response body that was not valid JSON.
pub const RAW_RESPONSE_KEY: &str = "raw_response";

/// Body of a successful query: parsed JSON, or the raw text when parsing failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiPayload {
    Raw { raw_response: String },
    Json(Value),
}

impl ApiPayload {
    /// Parse a response body, falling back to raw text.
    pub fn from_body(body: String) -> Self {
        match serde_json::from_str(&body) {
            Ok(value) => ApiPayload::Json(value),
            Err(e) => {
                tracing::debug!("Response is not JSON ({}), keeping raw text", e);
                ApiPayload::Raw { raw_response: body }
            }
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, ApiPayload::Raw { .. })
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiPayload::Json(value) => Some(value),
            ApiPayload::Raw { .. } => None,
        }
    }

    pub fn raw_text(&self) -> Option<&str> {
        match self {
            ApiPayload::Raw { raw_response } => Some(raw_response),
            ApiPayload::Json(_) => None,
        }
    }

    /// JSON form as it appears in tool envelopes.
    pub fn to_value(&self) -> Value {
        match self {
            ApiPayload::Json(value) => value.clone(),
            ApiPayload::Raw { raw_response } => json!({ RAW_RESPONSE_KEY: raw_response }),
        }
    }
}
