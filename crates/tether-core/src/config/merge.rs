//! Non-destructive merge, removal and listing of server entries.
//!
//! Every file operation reads the target fresh, works on the parsed
//! [`Document`], and leaves writing to the caller ([`write_config`]).
//! Writes are whole-file rewrites without locking; two processes editing the
//! same file concurrently race and the last writer wins.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use super::client_config::{ConfigFormat, Document, serializer_for_format};
use crate::error::Result;

/// Root keys under which known clients keep their server entries.
pub const RECOGNIZED_ROOT_KEYS: [&str; 6] = [
    "mcpServers",
    "servers",
    "extensions",
    "mcp",
    "context_servers",
    "mcp_servers",
];

/// Read a config file. A missing or empty file is an empty document.
pub fn read_config(path: &Path, format: ConfigFormat) -> Result<Document> {
    let document = serializer_for_format(format).load(path)?;
    debug!(path = %path.display(), %format, keys = document.len(), "read config");
    Ok(document)
}

/// Serialize a document and replace the file's contents with it.
pub fn write_config(path: &Path, format: ConfigFormat, document: &Document) -> Result<()> {
    serializer_for_format(format).save(path, document)?;
    debug!(path = %path.display(), %format, "wrote config");
    Ok(())
}

/// Merge a generated document into an existing one.
///
/// Object-valued keys of `generated` are merged one level deep: entries only
/// in `existing` survive, entries in both take the generated value whole.
/// Non-object values overwrite. Keys of `existing` that `generated` does not
/// mention are untouched.
pub fn merge_documents(mut existing: Document, generated: &Document) -> Document {
    for (key, value) in generated {
        match value {
            Value::Object(entries) => match existing.get_mut(key) {
                Some(Value::Object(section)) => {
                    for (name, entry) in entries {
                        section.insert(name.clone(), entry.clone());
                    }
                }
                Some(slot) => {
                    warn!(key = %key, found = %slot, "replacing non-object section");
                    *slot = value.clone();
                }
                None => {
                    existing.insert(key.clone(), value.clone());
                }
            },
            other => {
                existing.insert(key.clone(), other.clone());
            }
        }
    }
    existing
}

/// Delete `server_name` from every object-valued top-level section.
///
/// Returns whether anything was removed.
pub fn remove_server(document: &mut Document, server_name: &str) -> bool {
    let mut removed = false;
    for (key, section) in document.iter_mut() {
        if let Value::Object(entries) = section
            && entries.shift_remove(server_name).is_some()
        {
            debug!(section = %key, server = server_name, "removed server entry");
            removed = true;
        }
    }
    removed
}

/// Server names found under the recognized root keys, in root-key order.
pub fn list_servers(document: &Document) -> Vec<String> {
    RECOGNIZED_ROOT_KEYS
        .iter()
        .filter_map(|root| document.get(*root).and_then(Value::as_object))
        .flat_map(|section| section.keys().cloned())
        .collect()
}

/// Read the file at `path` and merge `generated` into it.
pub fn merge_server_into_config(
    path: &Path,
    format: ConfigFormat,
    generated: &Document,
) -> Result<Document> {
    let existing = read_config(path, format)?;
    Ok(merge_documents(existing, generated))
}

/// Read the file at `path` and remove `server_name` from it.
///
/// Returns `None` when no section contained the server; the caller should not
/// write in that case.
pub fn remove_server_from_config(
    path: &Path,
    format: ConfigFormat,
    server_name: &str,
) -> Result<Option<Document>> {
    let mut document = read_config(path, format)?;
    if remove_server(&mut document, server_name) {
        Ok(Some(document))
    } else {
        debug!(path = %path.display(), server = server_name, "server not present");
        Ok(None)
    }
}

/// Read the file at `path` and list the servers it configures.
pub fn list_servers_in_config(path: &Path, format: ConfigFormat) -> Result<Vec<String>> {
    Ok(list_servers(&read_config(path, format)?))
}
