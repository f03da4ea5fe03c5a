//! Canonical MCP server specification, before any app-specific translation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::transport::Transport;
use crate::error::{Error, Result};

/// A server launched as a local child process speaking MCP over stdin/stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdioConfig {
    pub command: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl StdioConfig {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            cwd: None,
            timeout_ms: None,
            description: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.command.trim().is_empty() {
            return Err(Error::invalid_config("'command' must not be empty"));
        }
        validate_timeout(self.timeout_ms)
    }
}

/// A server reached over the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteConfig {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<Transport>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RemoteConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            transport: None,
            headers: BTreeMap::new(),
            timeout_ms: None,
            description: None,
        }
    }

    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn validate(&self) -> Result<()> {
        Url::parse(&self.url).map_err(|err| {
            Error::invalid_config(format!("'url' is not a valid URL ({}): {err}", self.url))
        })?;
        if self.transport == Some(Transport::Stdio) {
            return Err(Error::invalid_config(
                "remote servers cannot use the 'stdio' transport",
            ));
        }
        validate_timeout(self.timeout_ms)
    }
}

/// The canonical description of one server: either a process or an endpoint.
///
/// Presence of `command` identifies a stdio server and presence of `url` a
/// remote one. Deserialization goes through [`ServerConfig::from_value`], so
/// a document with neither (or both) is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, try_from = "Value")]
pub enum ServerConfig {
    Stdio(StdioConfig),
    Remote(RemoteConfig),
}

impl ServerConfig {
    /// Validate and classify an untyped canonical config.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::invalid_config("server config must be an object"))?;
        let present = |key: &str| object.get(key).is_some_and(|v| !v.is_null());

        let config = match (present("command"), present("url")) {
            (true, false) => ServerConfig::Stdio(decode(value)?),
            (false, true) => ServerConfig::Remote(decode(value)?),
            (true, true) => {
                return Err(Error::invalid_config(
                    "server config must have either 'command' or 'url', not both",
                ));
            }
            (false, false) => {
                return Err(Error::invalid_config(
                    "server config must have either 'command' or 'url'",
                ));
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            ServerConfig::Stdio(stdio) => stdio.validate(),
            ServerConfig::Remote(remote) => remote.validate(),
        }
    }

    pub fn is_stdio(&self) -> bool {
        matches!(self, ServerConfig::Stdio(_))
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            ServerConfig::Stdio(stdio) => stdio.description.as_deref(),
            ServerConfig::Remote(remote) => remote.description.as_deref(),
        }
    }

    pub fn timeout_ms(&self) -> Option<u64> {
        match self {
            ServerConfig::Stdio(stdio) => stdio.timeout_ms,
            ServerConfig::Remote(remote) => remote.timeout_ms,
        }
    }
}

impl TryFrom<Value> for ServerConfig {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        ServerConfig::from_value(&value)
    }
}

impl From<StdioConfig> for ServerConfig {
    fn from(config: StdioConfig) -> Self {
        ServerConfig::Stdio(config)
    }
}

impl From<RemoteConfig> for ServerConfig {
    fn from(config: RemoteConfig) -> Self {
        ServerConfig::Remote(config)
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: &Value) -> Result<T> {
    T::deserialize(value).map_err(|err| Error::invalid_config(err.to_string()))
}

fn validate_timeout(timeout_ms: Option<u64>) -> Result<()> {
    if timeout_ms == Some(0) {
        return Err(Error::invalid_config("'timeoutMs' must be a positive integer"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_classifies_stdio() {
        let config = ServerConfig::from_value(&json!({
            "command": "npx",
            "args": ["-y", "@modelcontextprotocol/server-filesystem"],
            "env": {"ROOT": "/tmp"},
            "timeoutMs": 30000
        }))
        .unwrap();

        let ServerConfig::Stdio(stdio) = config else {
            panic!("expected stdio config");
        };
        assert_eq!(stdio.command, "npx");
        assert_eq!(stdio.args.len(), 2);
        assert_eq!(stdio.env.get("ROOT").map(String::as_str), Some("/tmp"));
        assert_eq!(stdio.timeout_ms, Some(30000));
    }

    #[test]
    fn from_value_classifies_remote() {
        let config = ServerConfig::from_value(&json!({
            "url": "https://mcp.example.com/mcp",
            "transport": "streamable-http",
            "headers": {"Authorization": "Bearer x"}
        }))
        .unwrap();

        let ServerConfig::Remote(remote) = config else {
            panic!("expected remote config");
        };
        assert_eq!(remote.transport, Some(Transport::StreamableHttp));
        assert_eq!(remote.headers.len(), 1);
    }

    #[test]
    fn empty_object_is_invalid() {
        let err = ServerConfig::from_value(&json!({})).unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn command_and_url_together_are_invalid() {
        let err =
            ServerConfig::from_value(&json!({"command": "npx", "url": "https://x.dev"})).unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn blank_command_is_invalid() {
        let err = ServerConfig::from_value(&json!({"command": "  "})).unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn malformed_url_is_invalid() {
        let err = ServerConfig::from_value(&json!({"url": "not a url"})).unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let err = ServerConfig::from_value(&json!({"command": "npx", "timeoutMs": 0})).unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn stdio_transport_on_remote_is_invalid() {
        let err = ServerConfig::from_value(&json!({"url": "https://x.dev", "transport": "stdio"}))
            .unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn deserialize_goes_through_validation() {
        let parsed: Result<ServerConfig, _> = serde_json::from_str("{}");
        assert!(parsed.is_err());

        let parsed: ServerConfig = serde_json::from_str(r#"{"command": "uvx"}"#).unwrap();
        assert!(parsed.is_stdio());
    }

    #[test]
    fn serialize_omits_empty_optionals() {
        let config = ServerConfig::from(StdioConfig::new("uvx"));
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value, json!({"command": "uvx"}));
    }
}
