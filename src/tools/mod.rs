//! Named tools exposing the client operations.
//!
//! Provides:
//! - The closed set of tool kinds with their parameter schemas
//! - The uniform result envelope
//! - The registry that dispatches calls to the client

pub mod envelope;
pub mod kind;
pub mod registry;

pub use envelope::{ToolEnvelope, ToolErrorType};
pub use kind::{ToolDefinition, ToolKind};
pub use registry::ToolRegistry;
