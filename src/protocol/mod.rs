//! JSON-RPC tool server.
//!
//! Requests arrive one per line on stdin and each gets one response line on
//! stdout. Supported methods are `initialize`, `tools/list` and `tools/call`.

pub mod message;
pub mod server;

pub use message::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, Method, MCP_PROTOCOL_VERSION,
};
pub use server::McpServer;
