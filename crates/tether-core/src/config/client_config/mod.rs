//! Client configuration file codecs.
//!
//! This module reads and writes third-party client configuration files
//! (e.g., `~/.codex/config.toml`, `claude_desktop_config.json`,
//! `~/.config/goose/config.yaml`) in the four formats clients use.
//!
//! All implementations normalize to [`Document`] (`serde_json::Map<String, Value>`)
//! as the intermediate representation, so generators and the merge engine
//! never look at format-specific trees.

mod json;
mod jsonc;
mod toml;
mod yaml;

use std::fmt;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub use self::json::JsonSerializer;
pub use self::jsonc::{JsoncSerializer, strip_json_comments};
pub use self::toml::{TomlSerializer, to_toml_string};
pub use self::yaml::YamlSerializer;

/// A parsed configuration file: always a mapping at the root.
pub type Document = Map<String, Value>;

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    Json,
    Jsonc,
    Yaml,
    Toml,
}

impl ConfigFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Jsonc => "jsonc",
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Toml => "toml",
        }
    }

    /// Detect the format from a file extension (case-insensitive).
    ///
    /// Unknown or missing extensions are treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("jsonc") => ConfigFormat::Jsonc,
            Some("yaml" | "yml") => ConfigFormat::Yaml,
            Some("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ConfigFormat::Json),
            "jsonc" => Ok(ConfigFormat::Jsonc),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            other => Err(format!(
                "unknown config format '{other}' (expected json, jsonc, yaml or toml)"
            )),
        }
    }
}

/// Trait for parsing and serializing client configuration files.
pub trait ConfigSerializer: Send + Sync {
    /// Get the format this serializer handles.
    fn format(&self) -> ConfigFormat;

    /// Parse document text. Empty or whitespace-only text yields an empty document.
    fn parse(&self, text: &str) -> Result<Document>;

    /// Render a document in this format.
    fn serialize(&self, document: &Document) -> Result<String>;

    /// Load a configuration file.
    ///
    /// Returns an empty document if the file does not exist. Contents that
    /// are not valid UTF-8 are a parse error, not an I/O error.
    fn load(&self, path: &Path) -> Result<Document> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Document::new()),
            Err(err) => return Err(Error::io(path, err)),
        };
        let text = String::from_utf8(bytes)
            .map_err(|err| parse_error(self.format(), err).with_path(path))?;
        self.parse(&text).map_err(|err| err.with_path(path))
    }

    /// Save a document to the configuration file, replacing its contents.
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self, path: &Path, document: &Document) -> Result<()> {
        let text = self.serialize(document)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| Error::io(parent, err))?;
        }
        std::fs::write(path, text).map_err(|err| Error::io(path, err))
    }
}

/// Create a serializer for the given format.
pub fn serializer_for_format(format: ConfigFormat) -> Box<dyn ConfigSerializer> {
    match format {
        ConfigFormat::Json => Box::new(JsonSerializer),
        ConfigFormat::Jsonc => Box::new(JsoncSerializer),
        ConfigFormat::Yaml => Box::new(YamlSerializer),
        ConfigFormat::Toml => Box::new(TomlSerializer),
    }
}

/// Parse document text in the given format.
pub fn parse_document(text: &str, format: ConfigFormat) -> Result<Document> {
    serializer_for_format(format).parse(text)
}

/// Serialize a document in the given format.
pub fn serialize_document(document: &Document, format: ConfigFormat) -> Result<String> {
    serializer_for_format(format).serialize(document)
}

pub(crate) fn parse_error(format: ConfigFormat, message: impl fmt::Display) -> Error {
    Error::Parse {
        path: None,
        format,
        message: message.to_string(),
    }
}

pub(crate) fn serialize_error(format: ConfigFormat, message: impl fmt::Display) -> Error {
    Error::Serialize {
        format,
        message: message.to_string(),
    }
}

/// Require a mapping at the document root. A null root (e.g. a YAML file
/// holding only comments) counts as empty.
pub(crate) fn expect_document(value: Value, format: ConfigFormat) -> Result<Document> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Document::new()),
        other => Err(parse_error(
            format,
            format!("expected a mapping at the document root, found {}", kind_of(&other)),
        )),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
