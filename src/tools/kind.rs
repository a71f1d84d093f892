//! The closed set of tools exposed over the protocol server.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{json, Value};

/// Every supported tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    ListDatasets,
    GetDatasetInfo,
    GetApiManual,
    DownloadDataset,
    ValidateApiKey,
}

/// Name, description and parameter schema of one tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolKind {
    /// All tools in listing order.
    pub const ALL: [ToolKind; 5] = [
        ToolKind::ListDatasets,
        ToolKind::GetDatasetInfo,
        ToolKind::GetApiManual,
        ToolKind::DownloadDataset,
        ToolKind::ValidateApiKey,
    ];

    /// Wire name of the tool.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::ListDatasets => "list_datasets",
            ToolKind::GetDatasetInfo => "get_dataset_info",
            ToolKind::GetApiManual => "get_api_manual",
            ToolKind::DownloadDataset => "download_dataset",
            ToolKind::ValidateApiKey => "validate_api_key",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::ListDatasets => "List every dataset available on AI-Hub.",
            ToolKind::GetDatasetInfo => "Show the details and file tree of one dataset.",
            ToolKind::GetApiManual => "Show the AI-Hub API manual and usage guide.",
            ToolKind::DownloadDataset => {
                "Download a dataset, either completely or only selected files."
            }
            ToolKind::ValidateApiKey => "Check whether the configured API key is accepted.",
        }
    }

    /// JSON schema of the tool's arguments.
    pub fn input_schema(self) -> Value {
        match self {
            ToolKind::ListDatasets | ToolKind::GetApiManual | ToolKind::ValidateApiKey => json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
            ToolKind::GetDatasetInfo => json!({
                "type": "object",
                "properties": {
                    "dataset_key": {
                        "type": "string",
                        "description": "Key of the dataset to look up"
                    }
                },
                "required": ["dataset_key"]
            }),
            ToolKind::DownloadDataset => json!({
                "type": "object",
                "properties": {
                    "dataset_key": {
                        "type": "string",
                        "description": "Key of the dataset to download"
                    },
                    "file_keys": {
                        "type": ["string", "integer", "array"],
                        "items": { "type": ["string", "integer"] },
                        "description": "File keys to download (omit for all files)"
                    },
                    "output_path": {
                        "type": "string",
                        "description": "Destination directory (omit for the default)"
                    },
                    "extract": {
                        "type": "boolean",
                        "description": "Unpack the archive after download",
                        "default": true
                    }
                },
                "required": ["dataset_key"]
            }),
        }
    }

    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }

    /// Definitions of every tool, in listing order.
    pub fn definitions() -> Vec<ToolDefinition> {
        Self::ALL.iter().map(|kind| kind.definition()).collect()
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("Unknown tool: {}", s))
    }
}
