//! JSON serializer for client configuration files.

use serde_json::Value;

use super::{ConfigFormat, ConfigSerializer, Document, expect_document, parse_error, serialize_error};
use crate::error::Result;

/// JSON configuration file serializer.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSerializer;

impl ConfigSerializer for JsonSerializer {
    fn format(&self) -> ConfigFormat {
        ConfigFormat::Json
    }

    fn parse(&self, text: &str) -> Result<Document> {
        parse_json(text, ConfigFormat::Json)
    }

    fn serialize(&self, document: &Document) -> Result<String> {
        to_pretty_json(document, ConfigFormat::Json)
    }
}

pub(super) fn parse_json(text: &str, format: ConfigFormat) -> Result<Document> {
    if text.trim().is_empty() {
        return Ok(Document::new());
    }
    let value: Value = serde_json::from_str(text).map_err(|err| parse_error(format, err))?;
    expect_document(value, format)
}

/// Two-space indented JSON with a trailing newline.
pub(super) fn to_pretty_json(document: &Document, format: ConfigFormat) -> Result<String> {
    let mut text =
        serde_json::to_string_pretty(document).map_err(|err| serialize_error(format, err))?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialize_uses_two_space_indent_and_trailing_newline() {
        let mut document = Document::new();
        document.insert("mcpServers".to_string(), json!({"a": {"command": "npx"}}));

        let text = JsonSerializer.serialize(&document).unwrap();

        assert!(text.starts_with("{\n  \"mcpServers\": {\n    \"a\": {"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn parse_rejects_comments() {
        let err = JsonSerializer.parse("{\"a\": 1 // no\n}").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn parse_keeps_key_order() {
        let document = JsonSerializer.parse(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<_> = document.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
