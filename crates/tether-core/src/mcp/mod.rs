//! Canonical MCP server model and transport inference.

pub mod spec;
pub mod transport;

pub use spec::{RemoteConfig, ServerConfig, StdioConfig};
pub use transport::{Transport, infer_remote_transport, infer_transport};
