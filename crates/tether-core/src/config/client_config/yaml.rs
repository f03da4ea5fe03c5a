//! YAML serializer for client configuration files.
//!
//! Mapping keys are always strings in a [`Document`]: a non-string key such
//! as `1: one` is read as `"1"` and written back quoted.

use serde_json::Value;

use super::{ConfigFormat, ConfigSerializer, Document, expect_document, parse_error, serialize_error};
use crate::error::Result;

/// YAML configuration file serializer.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlSerializer;

impl ConfigSerializer for YamlSerializer {
    fn format(&self) -> ConfigFormat {
        ConfigFormat::Yaml
    }

    fn parse(&self, text: &str) -> Result<Document> {
        if text.trim().is_empty() {
            return Ok(Document::new());
        }
        let value: Value =
            serde_yaml::from_str(text).map_err(|err| parse_error(ConfigFormat::Yaml, err))?;
        expect_document(value, ConfigFormat::Yaml)
    }

    fn serialize(&self, document: &Document) -> Result<String> {
        serde_yaml::to_string(document).map_err(|err| serialize_error(ConfigFormat::Yaml, err))
    }
}
