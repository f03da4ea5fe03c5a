//! Client generator layer for cross-client compatibility
//!
//! Each supported client application is described by an [`AppTarget`]: where
//! its config file lives, which root key holds servers, and how canonical
//! fields map onto its native entry shape. A single
//! [`DescriptorGenerator`](generator::DescriptorGenerator) turns any target
//! into a [`ConfigGenerator`](generator::ConfigGenerator).

pub mod generator;
pub mod registry;
pub mod targets;

use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use crate::config::ConfigFormat;
use crate::mcp::Transport;

pub use generator::{ConfigGenerator, DescriptorGenerator};
pub use registry::GeneratorRegistry;

/// Directories that client config paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientContext {
    pub home_dir: PathBuf,
    /// Platform config directory (`~/.config`, `~/Library/Application Support`, `%APPDATA%`).
    pub config_dir: PathBuf,
}

impl ClientContext {
    pub fn new(home_dir: PathBuf, config_dir: PathBuf) -> Self {
        Self {
            home_dir,
            config_dir,
        }
    }

    /// Context rooted at `home_dir`, with the config directory at `home_dir/.config`.
    pub fn with_home(home_dir: impl Into<PathBuf>) -> Self {
        let home_dir = home_dir.into();
        let config_dir = home_dir.join(".config");
        Self {
            home_dir,
            config_dir,
        }
    }

    /// Context for the current user, or `None` if the home directory is unknown.
    pub fn from_env() -> Option<Self> {
        let home_dir = dirs::home_dir()?;
        let config_dir = dirs::config_dir().unwrap_or_else(|| home_dir.join(".config"));
        Some(Self {
            home_dir,
            config_dir,
        })
    }

    fn root(&self, root: PathRoot) -> &Path {
        match root {
            PathRoot::Home => &self.home_dir,
            PathRoot::Config => &self.config_dir,
        }
    }
}

/// Base directory an [`AppPath`] is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRoot {
    Home,
    Config,
}

/// A location owned by a client application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppPath {
    pub root: PathRoot,
    pub relative: &'static str,
}

impl AppPath {
    pub const fn home(relative: &'static str) -> Self {
        Self {
            root: PathRoot::Home,
            relative,
        }
    }

    pub const fn config(relative: &'static str) -> Self {
        Self {
            root: PathRoot::Config,
            relative,
        }
    }

    pub fn resolve(&self, ctx: &ClientContext) -> PathBuf {
        ctx.root(self.root).join(self.relative)
    }
}

/// How the stdio command is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStyle {
    /// `command` and `args` as separate fields.
    Split,
    /// A single array holding the command followed by its args.
    Array,
}

/// Field names for stdio entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StdioShape {
    pub command_key: &'static str,
    pub command_style: CommandStyle,
    pub args_key: &'static str,
    pub env_key: &'static str,
    /// `None` when the client has no working-directory setting.
    pub cwd_key: Option<&'static str>,
}

impl StdioShape {
    pub const CANONICAL: StdioShape = StdioShape {
        command_key: "command",
        command_style: CommandStyle::Split,
        args_key: "args",
        env_key: "env",
        cwd_key: Some("cwd"),
    };
}

/// Field names for remote entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteShape {
    pub url_key: &'static str,
    /// Overrides `url_key` for SSE endpoints.
    pub sse_url_key: Option<&'static str>,
    pub headers_key: &'static str,
}

impl RemoteShape {
    pub const CANONICAL: RemoteShape = RemoteShape {
        url_key: "url",
        sse_url_key: None,
        headers_key: "headers",
    };
}

/// Per-client lookup table from canonical [`Transport`] to the label written
/// in the entry's type field. A missing label means no type field is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportLabels {
    stdio: Option<&'static str>,
    http: Option<&'static str>,
    streamable_http: Option<&'static str>,
    sse: Option<&'static str>,
}

impl TransportLabels {
    /// Never write a type field.
    pub const NONE: TransportLabels = TransportLabels {
        stdio: None,
        http: None,
        streamable_http: None,
        sse: None,
    };

    /// Every transport labelled with its canonical name.
    pub const CANONICAL: TransportLabels = TransportLabels {
        stdio: Some("stdio"),
        http: Some("http"),
        streamable_http: Some("streamable-http"),
        sse: Some("sse"),
    };

    /// Replace the label used for one transport.
    pub const fn with(mut self, transport: Transport, label: &'static str) -> Self {
        match transport {
            Transport::Stdio => self.stdio = Some(label),
            Transport::Http => self.http = Some(label),
            Transport::StreamableHttp => self.streamable_http = Some(label),
            Transport::Sse => self.sse = Some(label),
        }
        self
    }

    /// Stop labelling one transport.
    pub const fn without(mut self, transport: Transport) -> Self {
        match transport {
            Transport::Stdio => self.stdio = None,
            Transport::Http => self.http = None,
            Transport::StreamableHttp => self.streamable_http = None,
            Transport::Sse => self.sse = None,
        }
        self
    }

    pub fn label(&self, transport: Transport) -> Option<&'static str> {
        match transport {
            Transport::Stdio => self.stdio,
            Transport::Http => self.http,
            Transport::StreamableHttp => self.streamable_http,
            Transport::Sse => self.sse,
        }
    }
}

/// Where and in which unit a timeout is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutField {
    None,
    Millis(&'static str),
    /// Whole seconds, rounded up.
    Seconds(&'static str),
}

impl TimeoutField {
    pub fn render(&self, timeout_ms: u64) -> Option<(&'static str, Value)> {
        match *self {
            TimeoutField::None => None,
            TimeoutField::Millis(key) => Some((key, json!(timeout_ms))),
            TimeoutField::Seconds(key) => Some((key, json!(timeout_ms.div_ceil(1000)))),
        }
    }
}

/// Which kind of entry a static field is added to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldScope {
    Stdio,
    Remote,
    Both,
}

impl FieldScope {
    pub fn applies_to(self, stdio: bool) -> bool {
        match self {
            FieldScope::Both => true,
            FieldScope::Stdio => stdio,
            FieldScope::Remote => !stdio,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticValue {
    Bool(bool),
    Str(&'static str),
    StrList(&'static [&'static str]),
}

impl StaticValue {
    pub fn to_value(self) -> Value {
        match self {
            StaticValue::Bool(b) => Value::Bool(b),
            StaticValue::Str(s) => Value::String(s.to_string()),
            StaticValue::StrList(items) => json!(items),
        }
    }
}

/// A field written into every entry regardless of the canonical config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticField {
    pub key: &'static str,
    pub value: StaticValue,
    pub scope: FieldScope,
}

impl StaticField {
    pub const fn both(key: &'static str, value: StaticValue) -> Self {
        Self {
            key,
            value,
            scope: FieldScope::Both,
        }
    }

    pub const fn stdio(key: &'static str, value: StaticValue) -> Self {
        Self {
            key,
            value,
            scope: FieldScope::Stdio,
        }
    }
}

/// Declarative description of one client application's MCP config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppTarget {
    pub id: &'static str,
    pub display_name: &'static str,
    pub root_key: &'static str,
    pub format: ConfigFormat,
    /// Default location of the user-level config file.
    pub config_path: AppPath,
    /// Any of these existing means the client is installed.
    pub detect_paths: &'static [AppPath],
    pub stdio: StdioShape,
    pub remote: RemoteShape,
    pub type_key: &'static str,
    pub type_labels: TransportLabels,
    pub timeout: TimeoutField,
    pub static_fields: &'static [StaticField],
    /// Write the server name inside the entry under this key.
    pub name_key: Option<&'static str>,
    pub description_key: Option<&'static str>,
    /// Top-level `$schema` value added by `generate_all`.
    pub schema: Option<&'static str>,
}

impl AppTarget {
    /// Canonical field names under `mcpServers` in a JSON file.
    pub const BASE: AppTarget = AppTarget {
        id: "",
        display_name: "",
        root_key: "mcpServers",
        format: ConfigFormat::Json,
        config_path: AppPath::home(""),
        detect_paths: &[],
        stdio: StdioShape::CANONICAL,
        remote: RemoteShape::CANONICAL,
        type_key: "type",
        type_labels: TransportLabels::NONE,
        timeout: TimeoutField::None,
        static_fields: &[],
        name_key: None,
        description_key: None,
        schema: None,
    };

    pub fn config_file(&self, ctx: &ClientContext) -> PathBuf {
        self.config_path.resolve(ctx)
    }
}
