//! JSON-with-comments serializer (VS Code and Zed settings files).
//!
//! Comments are stripped by a two-state scanner before handing the text to
//! `serde_json`. Writing produces plain JSON; comments are not re-added.

use super::json::{parse_json, to_pretty_json};
use super::{ConfigFormat, ConfigSerializer, Document};
use crate::error::Result;

/// JSONC configuration file serializer.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsoncSerializer;

impl ConfigSerializer for JsoncSerializer {
    fn format(&self) -> ConfigFormat {
        ConfigFormat::Jsonc
    }

    fn parse(&self, text: &str) -> Result<Document> {
        parse_json(&strip_json_comments(text), ConfigFormat::Jsonc)
    }

    fn serialize(&self, document: &Document) -> Result<String> {
        to_pretty_json(document, ConfigFormat::Jsonc)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InString,
}

/// Remove `//` line comments and `/* */` block comments from JSONC text.
///
/// String contents are copied verbatim, so `//` inside a URL survives. Line
/// comments stop before the newline, which is kept so parser error positions
/// still line up with the original file. An unterminated block comment runs
/// to the end of input.
pub fn strip_json_comments(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut state = ScanState::Normal;

    while let Some(c) = chars.next() {
        match state {
            ScanState::InString => {
                output.push(c);
                match c {
                    '\\' => {
                        if let Some(escaped) = chars.next() {
                            output.push(escaped);
                        }
                    }
                    '"' => state = ScanState::Normal,
                    _ => {}
                }
            }
            ScanState::Normal => match (c, chars.peek()) {
                ('"', _) => {
                    output.push(c);
                    state = ScanState::InString;
                }
                ('/', Some('/')) => {
                    while chars.next_if(|&next| next != '\n').is_some() {}
                }
                ('/', Some('*')) => {
                    chars.next();
                    let mut previous = None;
                    for next in chars.by_ref() {
                        if previous == Some('*') && next == '/' {
                            break;
                        }
                        previous = Some(next);
                    }
                }
                _ => output.push(c),
            },
        }
    }

    output
}
