//! TOML serializer for client configuration files.
//!
//! Parsing goes through the `toml` crate. Writing uses a small emitter that
//! covers what generators produce (tables, string arrays, strings, integers,
//! booleans) and only prints a table header when the table holds scalars.

use serde_json::{Map, Value};

use super::{ConfigFormat, ConfigSerializer, Document, parse_error, serialize_error};
use crate::error::Result;

/// TOML configuration file serializer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TomlSerializer;

impl ConfigSerializer for TomlSerializer {
    fn format(&self) -> ConfigFormat {
        ConfigFormat::Toml
    }

    fn parse(&self, text: &str) -> Result<Document> {
        let table: toml::Table =
            toml::from_str(text).map_err(|err| parse_error(ConfigFormat::Toml, err))?;
        Ok(toml_table_to_json(table))
    }

    fn serialize(&self, document: &Document) -> Result<String> {
        to_toml_string(document)
    }
}

/// Convert a TOML table to a JSON-compatible map.
fn toml_table_to_json(table: toml::Table) -> Map<String, Value> {
    table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json_value(value)))
        .collect()
}

/// Convert a single TOML value to a JSON value.
fn toml_to_json_value(toml_value: toml::Value) -> Value {
    match toml_value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => {
            // serde_json::Number doesn't support NaN/Infinity, fall back to string
            serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(f.to_string()))
        }
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json_value).collect()),
        toml::Value::Table(table) => Value::Object(toml_table_to_json(table)),
    }
}

/// Render a document as TOML text.
///
/// Each table emits its scalar and array keys first, under a `[dotted.path]`
/// header when the path is non-empty, then recurses into nested tables
/// separated by a blank line. Tables that only contain sub-tables get no
/// header of their own. `null` values are skipped.
///
/// Fails with `Error::Serialize` for integers TOML cannot represent
/// (anything above `i64::MAX`).
pub fn to_toml_string(document: &Document) -> Result<String> {
    let mut lines = Vec::new();
    emit_table(document, "", &mut lines)?;

    let mut output = String::new();
    let mut pending_blank = false;
    for line in lines {
        if line.is_empty() {
            pending_blank = !output.is_empty();
            continue;
        }
        if pending_blank {
            output.push('\n');
            pending_blank = false;
        }
        output.push_str(&line);
        output.push('\n');
    }
    Ok(output)
}

fn emit_table(table: &Map<String, Value>, path: &str, lines: &mut Vec<String>) -> Result<()> {
    let (nested, plain): (Vec<_>, Vec<_>) = table
        .iter()
        .filter(|(_, value)| !value.is_null())
        .partition(|(_, value)| value.is_object());

    // An empty table still gets a header so it survives a round trip.
    if !path.is_empty() && (!plain.is_empty() || nested.is_empty()) {
        lines.push(format!("[{path}]"));
    }

    for (key, value) in plain {
        lines.push(format!("{} = {}", format_key(key), format_value(value)?));
    }

    for (key, value) in nested {
        let Value::Object(child) = value else {
            continue;
        };
        let child_path = if path.is_empty() {
            format_key(key)
        } else {
            format!("{path}.{}", format_key(key))
        };
        lines.push(String::new());
        emit_table(child, &child_path, lines)?;
    }
    Ok(())
}

fn format_value(value: &Value) -> Result<String> {
    let rendered = match value {
        Value::String(s) => basic_string(s),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if n.is_u64() && n.as_i64().is_none() {
                return Err(serialize_error(
                    ConfigFormat::Toml,
                    format!("integer {n} is out of range for TOML"),
                ));
            }
            n.to_string()
        }
        Value::Array(items) => {
            let rendered = items
                .iter()
                .filter(|item| !item.is_null())
                .map(format_value)
                .collect::<Result<Vec<_>>>()?;
            format!("[{}]", rendered.join(", "))
        }
        Value::Object(map) => {
            let rendered = map
                .iter()
                .filter(|(_, item)| !item.is_null())
                .map(|(key, item)| -> Result<String> {
                    Ok(format!("{} = {}", format_key(key), format_value(item)?))
                })
                .collect::<Result<Vec<_>>>()?;
            if rendered.is_empty() {
                "{}".to_string()
            } else {
                format!("{{ {} }}", rendered.join(", "))
            }
        }
        Value::Null => "\"\"".to_string(),
    };
    Ok(rendered)
}

/// Quote `s` as a TOML basic string. Control characters, including DEL,
/// are written as escapes.
fn basic_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            c if c < ' ' || c == '\u{7f}' => {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Bare keys are `A-Za-z0-9_-`; anything else is emitted as a quoted key.
fn format_key(key: &str) -> String {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if bare {
        key.to_string()
    } else {
        basic_string(key)
    }
}
