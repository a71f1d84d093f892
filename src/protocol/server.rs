//! Line-delimited JSON-RPC server over the tool registry.

use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::Result;
use crate::protocol::message::{
    CallToolParams, CallToolResult, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, Method,
};
use crate::tools::ToolRegistry;

/// Answers protocol requests using a [`ToolRegistry`].
#[derive(Debug)]
pub struct McpServer {
    registry: ToolRegistry,
}

fn to_result<T: Serialize>(value: &T) -> std::result::Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(JsonRpcError::internal)
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Answer one request. Always produces a response keyed by the request id.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let JsonRpcRequest {
            id, method, params, ..
        } = request;

        let outcome = match method.parse::<Method>() {
            Ok(method) => {
                tracing::debug!("Handling {}", method);
                self.dispatch(method, params).await
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        }
    }

    async fn dispatch(
        &self,
        method: Method,
        params: Value,
    ) -> std::result::Result<Value, JsonRpcError> {
        match method {
            Method::Initialize => to_result(&InitializeResult::default()),
            Method::ToolsList => to_result(&ListToolsResult {
                tools: self.registry.definitions(),
            }),
            Method::ToolsCall => {
                let params: CallToolParams = if params.is_null() {
                    CallToolParams::default()
                } else {
                    serde_json::from_value(params).map_err(JsonRpcError::invalid_params)?
                };

                let envelope = self.registry.execute(&params.name, &params.arguments).await;
                let text =
                    serde_json::to_string_pretty(&envelope).map_err(JsonRpcError::internal)?;
                to_result(&CallToolResult::text(text))
            }
        }
    }

    /// Answer one input line. Blank and unparseable lines get no response.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => Some(self.handle_request(request).await),
            Err(e) => {
                tracing::warn!("Ignoring unparseable request line: {}", e);
                None
            }
        }
    }

    /// Serve newline-delimited requests until `reader` reaches EOF.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if let Some(response) = self.handle_line(&line).await {
                let mut encoded = serde_json::to_string(&response)?;
                encoded.push('\n');
                writer.write_all(encoded.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        tracing::info!("Input closed, stopping server");
        Ok(())
    }

    /// Serve on the process's stdin and stdout.
    pub async fn serve_stdio(&self) -> Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }
}
