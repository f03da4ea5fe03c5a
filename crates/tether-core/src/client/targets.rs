//! Built-in client descriptors.
//!
//! Each entry records how one application stores MCP servers. Anything not
//! set explicitly falls back to [`AppTarget::BASE`]: canonical field names
//! under `mcpServers` in a JSON file.

use super::{
    AppPath, AppTarget, CommandStyle, RemoteShape, StaticField, StaticValue, StdioShape,
    TimeoutField, TransportLabels,
};
use crate::config::ConfigFormat;
use crate::mcp::Transport;

pub static CLAUDE_DESKTOP: AppTarget = AppTarget {
    id: "claude-desktop",
    display_name: "Claude Desktop",
    config_path: AppPath::config("Claude/claude_desktop_config.json"),
    detect_paths: &[AppPath::config("Claude")],
    ..AppTarget::BASE
};

// Remote entries say "http" for streamable HTTP.
pub static CLAUDE_CODE: AppTarget = AppTarget {
    id: "claude-code",
    display_name: "Claude Code",
    config_path: AppPath::home(".claude.json"),
    detect_paths: &[AppPath::home(".claude"), AppPath::home(".claude.json")],
    type_labels: TransportLabels::CANONICAL.with(Transport::StreamableHttp, "http"),
    ..AppTarget::BASE
};

pub static CURSOR: AppTarget = AppTarget {
    id: "cursor",
    display_name: "Cursor",
    config_path: AppPath::home(".cursor/mcp.json"),
    detect_paths: &[AppPath::home(".cursor")],
    ..AppTarget::BASE
};

pub static VSCODE: AppTarget = AppTarget {
    id: "vscode",
    display_name: "VS Code",
    root_key: "servers",
    format: ConfigFormat::Jsonc,
    config_path: AppPath::config("Code/User/mcp.json"),
    detect_paths: &[AppPath::config("Code/User")],
    type_labels: TransportLabels::CANONICAL.with(Transport::StreamableHttp, "http"),
    ..AppTarget::BASE
};

pub static WINDSURF: AppTarget = AppTarget {
    id: "windsurf",
    display_name: "Windsurf",
    config_path: AppPath::home(".codeium/windsurf/mcp_config.json"),
    detect_paths: &[AppPath::home(".codeium/windsurf")],
    stdio: StdioShape {
        cwd_key: None,
        ..StdioShape::CANONICAL
    },
    remote: RemoteShape {
        url_key: "serverUrl",
        ..RemoteShape::CANONICAL
    },
    ..AppTarget::BASE
};

const CLINE_FIELDS: &[StaticField] = &[
    StaticField::both("alwaysAllow", StaticValue::StrList(&[])),
    StaticField::both("disabled", StaticValue::Bool(false)),
];

pub static CLINE: AppTarget = AppTarget {
    id: "cline",
    display_name: "Cline",
    config_path: AppPath::config(
        "Code/User/globalStorage/saoudrizwan.claude-dev/settings/cline_mcp_settings.json",
    ),
    detect_paths: &[AppPath::config(
        "Code/User/globalStorage/saoudrizwan.claude-dev",
    )],
    type_labels: TransportLabels::CANONICAL.with(Transport::Http, "streamable-http"),
    timeout: TimeoutField::Seconds("timeout"),
    static_fields: CLINE_FIELDS,
    ..AppTarget::BASE
};

pub static ROO_CODE: AppTarget = AppTarget {
    id: "roo-code",
    display_name: "Roo Code",
    config_path: AppPath::config(
        "Code/User/globalStorage/rooveterinaryinc.roo-cline/settings/mcp_settings.json",
    ),
    detect_paths: &[AppPath::config(
        "Code/User/globalStorage/rooveterinaryinc.roo-cline",
    )],
    type_labels: TransportLabels::CANONICAL.with(Transport::Http, "streamable-http"),
    timeout: TimeoutField::Seconds("timeout"),
    static_fields: CLINE_FIELDS,
    ..AppTarget::BASE
};

pub static ZED: AppTarget = AppTarget {
    id: "zed",
    display_name: "Zed",
    root_key: "context_servers",
    format: ConfigFormat::Jsonc,
    config_path: AppPath::home(".config/zed/settings.json"),
    detect_paths: &[AppPath::home(".config/zed")],
    stdio: StdioShape {
        cwd_key: None,
        ..StdioShape::CANONICAL
    },
    static_fields: &[StaticField::both("source", StaticValue::Str("custom"))],
    ..AppTarget::BASE
};

pub static GOOSE: AppTarget = AppTarget {
    id: "goose",
    display_name: "Goose",
    root_key: "extensions",
    format: ConfigFormat::Yaml,
    config_path: AppPath::home(".config/goose/config.yaml"),
    detect_paths: &[AppPath::home(".config/goose")],
    stdio: StdioShape {
        command_key: "cmd",
        env_key: "envs",
        cwd_key: None,
        ..StdioShape::CANONICAL
    },
    remote: RemoteShape {
        url_key: "uri",
        ..RemoteShape::CANONICAL
    },
    type_labels: TransportLabels::CANONICAL
        .with(Transport::Http, "streamable_http")
        .with(Transport::StreamableHttp, "streamable_http"),
    timeout: TimeoutField::Seconds("timeout"),
    static_fields: &[StaticField::both("enabled", StaticValue::Bool(true))],
    name_key: Some("name"),
    description_key: Some("description"),
    ..AppTarget::BASE
};

// Environment variables land in a `[mcp_servers.<name>.env]` sub-table.
pub static CODEX: AppTarget = AppTarget {
    id: "codex",
    display_name: "Codex",
    root_key: "mcp_servers",
    format: ConfigFormat::Toml,
    config_path: AppPath::home(".codex/config.toml"),
    detect_paths: &[AppPath::home(".codex")],
    remote: RemoteShape {
        headers_key: "http_headers",
        ..RemoteShape::CANONICAL
    },
    timeout: TimeoutField::Seconds("tool_timeout_sec"),
    ..AppTarget::BASE
};

pub static GEMINI_CLI: AppTarget = AppTarget {
    id: "gemini-cli",
    display_name: "Gemini CLI",
    config_path: AppPath::home(".gemini/settings.json"),
    detect_paths: &[AppPath::home(".gemini")],
    remote: RemoteShape {
        url_key: "httpUrl",
        sse_url_key: Some("url"),
        ..RemoteShape::CANONICAL
    },
    timeout: TimeoutField::Millis("timeout"),
    ..AppTarget::BASE
};

pub static OPENCODE: AppTarget = AppTarget {
    id: "opencode",
    display_name: "OpenCode",
    root_key: "mcp",
    config_path: AppPath::home(".config/opencode/opencode.json"),
    detect_paths: &[AppPath::home(".config/opencode")],
    stdio: StdioShape {
        command_style: CommandStyle::Array,
        env_key: "environment",
        cwd_key: None,
        ..StdioShape::CANONICAL
    },
    type_labels: TransportLabels::NONE
        .with(Transport::Stdio, "local")
        .with(Transport::Http, "remote")
        .with(Transport::StreamableHttp, "remote")
        .with(Transport::Sse, "remote"),
    timeout: TimeoutField::Millis("timeout"),
    static_fields: &[StaticField::both("enabled", StaticValue::Bool(true))],
    schema: Some("https://opencode.ai/config.json"),
    ..AppTarget::BASE
};

pub static KIRO: AppTarget = AppTarget {
    id: "kiro",
    display_name: "Kiro",
    config_path: AppPath::home(".kiro/settings/mcp.json"),
    detect_paths: &[AppPath::home(".kiro")],
    static_fields: &[
        StaticField::both("disabled", StaticValue::Bool(false)),
        StaticField::both("autoApprove", StaticValue::StrList(&[])),
    ],
    ..AppTarget::BASE
};

pub static GITHUB_COPILOT_CLI: AppTarget = AppTarget {
    id: "github-copilot-cli",
    display_name: "GitHub Copilot CLI",
    config_path: AppPath::home(".copilot/mcp-config.json"),
    detect_paths: &[AppPath::home(".copilot")],
    stdio: StdioShape {
        cwd_key: None,
        ..StdioShape::CANONICAL
    },
    type_labels: TransportLabels::CANONICAL
        .with(Transport::Stdio, "local")
        .with(Transport::StreamableHttp, "http"),
    static_fields: &[StaticField::both("tools", StaticValue::StrList(&["*"]))],
    ..AppTarget::BASE
};

pub static DROID: AppTarget = AppTarget {
    id: "droid",
    display_name: "Factory Droid",
    config_path: AppPath::home(".factory/mcp.json"),
    detect_paths: &[AppPath::home(".factory")],
    type_labels: TransportLabels::CANONICAL.with(Transport::StreamableHttp, "http"),
    static_fields: &[StaticField::both("disabled", StaticValue::Bool(false))],
    ..AppTarget::BASE
};

pub static LM_STUDIO: AppTarget = AppTarget {
    id: "lm-studio",
    display_name: "LM Studio",
    config_path: AppPath::home(".lmstudio/mcp.json"),
    detect_paths: &[AppPath::home(".lmstudio")],
    ..AppTarget::BASE
};

/// Every built-in client, in display order.
pub static BUILTIN_TARGETS: [&AppTarget; 16] = [
    &CLAUDE_DESKTOP,
    &CLAUDE_CODE,
    &CURSOR,
    &VSCODE,
    &WINDSURF,
    &CLINE,
    &ROO_CODE,
    &ZED,
    &GOOSE,
    &CODEX,
    &GEMINI_CLI,
    &OPENCODE,
    &KIRO,
    &GITHUB_COPILOT_CLI,
    &DROID,
    &LM_STUDIO,
];
