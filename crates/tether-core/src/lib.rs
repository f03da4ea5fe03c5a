//! Tether Core Library
//!
//! Translates one canonical MCP server definition into the native config
//! shape of each supported client application, and merges the result into
//! existing config files without disturbing unrelated settings.

pub mod client;
pub mod config;
pub mod error;
pub mod mcp;

pub use error::{Error, Result};

/// Re-exports of commonly used types
pub mod prelude {
    // Canonical model
    pub use crate::mcp::{RemoteConfig, ServerConfig, StdioConfig, Transport, infer_transport};

    // Client generators
    pub use crate::client::{AppTarget, ClientContext, ConfigGenerator, GeneratorRegistry};

    // Config files
    pub use crate::config::{
        ConfigFormat, Document, list_servers_in_config, merge_server_into_config,
        remove_server_from_config, write_config,
    };

    pub use crate::error::{Error, Result};
}
