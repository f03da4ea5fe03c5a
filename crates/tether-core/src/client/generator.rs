//! Translation of canonical server configs into client-native documents.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value, json};
use tracing::debug;

use super::{AppTarget, ClientContext, CommandStyle};
use crate::config::{ConfigFormat, Document, merge_documents, serialize_document};
use crate::error::Result;
use crate::mcp::transport::infer_remote_transport;
use crate::mcp::{RemoteConfig, ServerConfig, StdioConfig, Transport};

/// Capability interface shared by every client generator.
///
/// Only [`target`](ConfigGenerator::target) is required; the remaining
/// methods are driven by the descriptor and can be overridden per client.
pub trait ConfigGenerator: Send + Sync + fmt::Debug {
    /// The descriptor this generator renders for.
    fn target(&self) -> &AppTarget;

    fn id(&self) -> &'static str {
        self.target().id
    }

    fn root_key(&self) -> &'static str {
        self.target().root_key
    }

    fn format(&self) -> ConfigFormat {
        self.target().format
    }

    /// Render a stdio server as a native entry.
    fn transform_stdio(&self, name: &str, config: &StdioConfig) -> Map<String, Value> {
        render_stdio(self.target(), name, config)
    }

    /// Render a remote server as a native entry.
    fn transform_remote(&self, name: &str, config: &RemoteConfig) -> Map<String, Value> {
        render_remote(self.target(), name, config)
    }

    /// Build `{ root_key: { name: entry } }` for one server.
    ///
    /// Fails with `InvalidConfig` when `config` does not pass
    /// [`ServerConfig::validate`], so builder-made configs are held to the
    /// same rules as parsed ones.
    fn generate(&self, name: &str, config: &ServerConfig) -> Result<Document> {
        config.validate()?;
        let entry = match config {
            ServerConfig::Stdio(stdio) => self.transform_stdio(name, stdio),
            ServerConfig::Remote(remote) => self.transform_remote(name, remote),
        };
        debug!(app = self.id(), server = name, "generated entry");

        let mut servers = Map::new();
        servers.insert(name.to_string(), Value::Object(entry));
        let mut document = Document::new();
        document.insert(self.root_key().to_string(), Value::Object(servers));
        Ok(document)
    }

    /// Validate an untyped canonical config, then generate.
    ///
    /// Fails with `InvalidConfig` when the value has neither `command` nor `url`.
    fn generate_value(&self, name: &str, config: &Value) -> Result<Document> {
        let config = ServerConfig::from_value(config)?;
        self.generate(name, &config)
    }

    /// Generate several servers into one document under the shared root key.
    fn generate_all(&self, servers: &BTreeMap<String, ServerConfig>) -> Result<Document> {
        let mut document = Document::new();
        if let Some(schema) = self.target().schema {
            document.insert("$schema".to_string(), json!(schema));
        }
        if servers.is_empty() {
            document.insert(self.root_key().to_string(), Value::Object(Map::new()));
        }
        servers.iter().try_fold(document, |document, (name, config)| {
            Ok(merge_documents(document, &self.generate(name, config)?))
        })
    }

    /// Render a document in this client's file format.
    fn serialize(&self, document: &Document) -> Result<String> {
        serialize_document(document, self.format())
    }

    /// Whether the client appears to be installed for this user.
    fn detect_installed(&self, ctx: &ClientContext) -> bool {
        self.target()
            .detect_paths
            .iter()
            .any(|path| path.resolve(ctx).exists())
    }
}

/// The generator used for every built-in client: all behaviour comes from
/// its [`AppTarget`].
#[derive(Debug, Clone, Copy)]
pub struct DescriptorGenerator {
    target: &'static AppTarget,
}

impl DescriptorGenerator {
    pub fn new(target: &'static AppTarget) -> Self {
        Self { target }
    }
}

impl ConfigGenerator for DescriptorGenerator {
    fn target(&self) -> &AppTarget {
        self.target
    }
}

/// Render a stdio entry from a descriptor, omitting empty optionals.
pub fn render_stdio(target: &AppTarget, name: &str, config: &StdioConfig) -> Map<String, Value> {
    let shape = &target.stdio;
    let mut entry = Map::new();

    insert_header(&mut entry, target, name, Transport::Stdio);

    match shape.command_style {
        CommandStyle::Split => {
            entry.insert(shape.command_key.to_string(), json!(config.command));
            if !config.args.is_empty() {
                entry.insert(shape.args_key.to_string(), json!(config.args));
            }
        }
        CommandStyle::Array => {
            let command: Vec<&str> = std::iter::once(config.command.as_str())
                .chain(config.args.iter().map(String::as_str))
                .collect();
            entry.insert(shape.command_key.to_string(), json!(command));
        }
    }

    if !config.env.is_empty() {
        entry.insert(shape.env_key.to_string(), json!(config.env));
    }
    if let (Some(key), Some(cwd)) = (shape.cwd_key, config.cwd.as_deref())
        && !cwd.is_empty()
    {
        entry.insert(key.to_string(), json!(cwd));
    }

    insert_trailer(
        &mut entry,
        target,
        true,
        config.timeout_ms,
        config.description.as_deref(),
    );
    entry
}

/// Render a remote entry from a descriptor, omitting empty optionals.
pub fn render_remote(target: &AppTarget, name: &str, config: &RemoteConfig) -> Map<String, Value> {
    let shape = &target.remote;
    let transport = infer_remote_transport(config);
    let mut entry = Map::new();

    insert_header(&mut entry, target, name, transport);

    let url_key = match (transport, shape.sse_url_key) {
        (Transport::Sse, Some(key)) => key,
        _ => shape.url_key,
    };
    entry.insert(url_key.to_string(), json!(config.url));
    if !config.headers.is_empty() {
        entry.insert(shape.headers_key.to_string(), json!(config.headers));
    }

    insert_trailer(
        &mut entry,
        target,
        false,
        config.timeout_ms,
        config.description.as_deref(),
    );
    entry
}

fn insert_header(entry: &mut Map<String, Value>, target: &AppTarget, name: &str, transport: Transport) {
    if let Some(key) = target.name_key {
        entry.insert(key.to_string(), json!(name));
    }
    if let Some(label) = target.type_labels.label(transport) {
        entry.insert(target.type_key.to_string(), json!(label));
    }
}

fn insert_trailer(
    entry: &mut Map<String, Value>,
    target: &AppTarget,
    stdio: bool,
    timeout_ms: Option<u64>,
    description: Option<&str>,
) {
    if let Some((key, value)) = timeout_ms.and_then(|ms| target.timeout.render(ms)) {
        entry.insert(key.to_string(), value);
    }
    if let (Some(key), Some(text)) = (target.description_key, description)
        && !text.is_empty()
    {
        entry.insert(key.to_string(), json!(text));
    }
    for field in target.static_fields {
        if field.scope.applies_to(stdio) {
            entry.insert(field.key.to_string(), field.value.to_value());
        }
    }
}
