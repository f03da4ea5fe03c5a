//! Config file handling: format codecs and the merge engine.

pub mod client_config;
pub mod merge;

pub use client_config::{
    ConfigFormat, ConfigSerializer, Document, parse_document, serialize_document,
    serializer_for_format,
};
pub use merge::{
    RECOGNIZED_ROOT_KEYS, list_servers, list_servers_in_config, merge_documents,
    merge_server_into_config, read_config, remove_server, remove_server_from_config, write_config,
};
