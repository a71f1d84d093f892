//! Dispatch of tool calls onto the API client.

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::AihubClient;
use crate::download::{DownloadRequest, FileSelector};
use crate::error::Result;
use crate::output::mask_api_key;
use crate::tools::envelope::{ToolEnvelope, ToolErrorType};
use crate::tools::kind::{ToolDefinition, ToolKind};

/// A single file key. Numeric keys are sent as their decimal text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FileKey {
    Text(String),
    Number(serde_json::Number),
}

impl FileKey {
    fn into_text(self) -> String {
        match self {
            FileKey::Text(key) => key,
            FileKey::Number(number) => number.to_string(),
        }
    }
}

/// `file_keys` may be one key or a list of keys.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FileKeysArg {
    One(FileKey),
    Many(Vec<FileKey>),
}

impl From<FileKeysArg> for FileSelector {
    fn from(arg: FileKeysArg) -> Self {
        match arg {
            FileKeysArg::One(FileKey::Text(key)) if key.trim().is_empty() => FileSelector::All,
            FileKeysArg::One(key) => FileSelector::Single(key.into_text()),
            FileKeysArg::Many(keys) => {
                FileSelector::from_keys(keys.into_iter().map(FileKey::into_text))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct DownloadArgs {
    #[serde(default)]
    file_keys: Option<FileKeysArg>,
    #[serde(default)]
    output_path: Option<PathBuf>,
    #[serde(default)]
    extract: Option<bool>,
}

/// Runs tools against one client.
#[derive(Debug)]
pub struct ToolRegistry {
    client: AihubClient,
}

impl ToolRegistry {
    pub fn new(client: AihubClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AihubClient {
        &self.client
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        ToolKind::definitions()
    }

    /// Run the named tool. Every outcome, including failures, is an envelope.
    pub async fn execute(&self, name: &str, arguments: &Value) -> ToolEnvelope {
        let kind = match name.parse::<ToolKind>() {
            Ok(kind) => kind,
            Err(message) => return ToolEnvelope::failure(ToolErrorType::UnknownTool, message),
        };

        let empty = json!({});
        let arguments = if arguments.is_null() { &empty } else { arguments };

        match self.dispatch(kind, arguments).await {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!("Tool {} failed: {}", kind, e);
                ToolEnvelope::from_error(&e)
            }
        }
    }

    async fn dispatch(&self, kind: ToolKind, arguments: &Value) -> Result<ToolEnvelope> {
        match kind {
            ToolKind::ListDatasets => {
                let payload = self.client.list_datasets().await?;
                Ok(ToolEnvelope::success(kind, payload.to_value()))
            }
            ToolKind::GetDatasetInfo => {
                let Some(dataset_key) = dataset_key_arg(arguments) else {
                    return Ok(ToolEnvelope::missing_parameter("dataset_key"));
                };
                let payload = self.client.get_dataset_info(&dataset_key).await?;
                Ok(ToolEnvelope::success(kind, payload.to_value()).with_dataset_key(dataset_key))
            }
            ToolKind::GetApiManual => {
                let payload = self.client.get_api_manual().await?;
                Ok(ToolEnvelope::success(kind, payload.to_value()))
            }
            ToolKind::DownloadDataset => {
                let Some(dataset_key) = dataset_key_arg(arguments) else {
                    return Ok(ToolEnvelope::missing_parameter("dataset_key"));
                };
                let args: DownloadArgs = serde_json::from_value(arguments.clone())?;

                let mut request = DownloadRequest::new(dataset_key)
                    .file_keys(args.file_keys.map(FileSelector::from).unwrap_or_default())
                    .extract(args.extract.unwrap_or(true))
                    .show_progress(false);
                if let Some(output_path) = args.output_path {
                    request = request.output_dir(output_path);
                }

                let result = self.client.download_dataset(&request).await?;
                Ok(ToolEnvelope::success(kind, serde_json::to_value(&result)?))
            }
            ToolKind::ValidateApiKey => {
                let is_valid = self.client.validate_api_key().await;
                Ok(ToolEnvelope::success(
                    kind,
                    json!({
                        "is_valid": is_valid,
                        "api_key_masked": mask_api_key(&self.client.config().api_key),
                    }),
                ))
            }
        }
    }
}

/// Non-empty `dataset_key` argument. Numeric keys are accepted as text.
fn dataset_key_arg(arguments: &Value) -> Option<String> {
    match arguments.get("dataset_key")? {
        Value::String(key) if !key.trim().is_empty() => Some(key.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
