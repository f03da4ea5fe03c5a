//! Native entry shapes for individual client apps.

use std::collections::BTreeMap;

use serde_json::{Value, json};
use tether_core::client::{ConfigGenerator, GeneratorRegistry};
use tether_core::mcp::{RemoteConfig, ServerConfig, StdioConfig, Transport};

fn entry(app: &str, name: &str, config: impl Into<ServerConfig>) -> Value {
    let registry = GeneratorRegistry::default();
    let generator = registry.require(app).unwrap();
    let document = generator.generate(name, &config.into()).unwrap();
    document[generator.root_key()][name].clone()
}

#[test]
fn claude_desktop_uses_canonical_fields() {
    let stdio = entry(
        "claude-desktop",
        "fs",
        StdioConfig::new("npx")
            .with_args(["-y", "@modelcontextprotocol/server-filesystem"])
            .with_env("ROOT", "/data"),
    );
    assert_eq!(
        stdio,
        json!({
            "command": "npx",
            "args": ["-y", "@modelcontextprotocol/server-filesystem"],
            "env": {"ROOT": "/data"}
        })
    );

    let remote = entry("claude-desktop", "api", RemoteConfig::new("https://api.dev/mcp"));
    assert_eq!(remote, json!({"url": "https://api.dev/mcp"}));
}

#[test]
fn vscode_uses_servers_root_and_http_type() {
    let registry = GeneratorRegistry::default();
    let vscode = registry.require("vscode").unwrap();
    let config = RemoteConfig::new("https://api.dev/mcp").with_transport(Transport::StreamableHttp);

    let document = vscode.generate("api", &config.into()).unwrap();

    assert_eq!(
        Value::Object(document),
        json!({"servers": {"api": {"type": "http", "url": "https://api.dev/mcp"}}})
    );
    assert_eq!(entry("vscode", "s", StdioConfig::new("npx"))["type"], json!("stdio"));
    assert_eq!(
        entry("vscode", "s", RemoteConfig::new("https://api.dev/sse"))["type"],
        json!("sse")
    );
}

#[test]
fn claude_code_tags_every_entry() {
    assert_eq!(
        entry("claude-code", "s", StdioConfig::new("npx")),
        json!({"type": "stdio", "command": "npx"})
    );
    assert_eq!(
        entry("claude-code", "h", RemoteConfig::new("https://x.dev/mcp"))["type"],
        json!("http")
    );
}

#[test]
fn windsurf_renames_url_and_drops_cwd() {
    let remote = entry("windsurf", "api", RemoteConfig::new("https://api.dev/mcp"));
    assert_eq!(remote, json!({"serverUrl": "https://api.dev/mcp"}));

    let stdio = entry("windsurf", "fs", StdioConfig::new("npx").with_cwd("/srv"));
    assert_eq!(stdio, json!({"command": "npx"}));
}

#[test]
fn cline_converts_timeout_and_adds_static_fields() {
    let remote = entry(
        "cline",
        "api",
        RemoteConfig::new("https://api.dev/mcp").with_timeout_ms(61_000),
    );
    assert_eq!(
        remote,
        json!({
            "type": "streamable-http",
            "url": "https://api.dev/mcp",
            "timeout": 62,
            "alwaysAllow": [],
            "disabled": false
        })
    );

    let stdio = entry("roo-code", "fs", StdioConfig::new("npx"));
    assert_eq!(stdio["type"], json!("stdio"));
    assert_eq!(stdio["alwaysAllow"], json!([]));
    assert_eq!(stdio["disabled"], json!(false));
}

#[test]
fn zed_marks_custom_source() {
    let registry = GeneratorRegistry::default();
    let zed = registry.require("zed").unwrap();
    assert_eq!(zed.root_key(), "context_servers");

    let stdio = entry("zed", "fs", StdioConfig::new("npx").with_args(["pkg"]));
    assert_eq!(
        stdio,
        json!({"command": "npx", "args": ["pkg"], "source": "custom"})
    );
}

#[test]
fn goose_extension_shape() {
    let stdio = entry(
        "goose",
        "fetch",
        StdioConfig::new("uvx")
            .with_args(["mcp-server-fetch"])
            .with_env("A", "1")
            .with_timeout_ms(300_000)
            .with_description("Fetch pages"),
    );
    assert_eq!(
        stdio,
        json!({
            "name": "fetch",
            "type": "stdio",
            "cmd": "uvx",
            "args": ["mcp-server-fetch"],
            "envs": {"A": "1"},
            "timeout": 300,
            "description": "Fetch pages",
            "enabled": true
        })
    );

    let http = entry("goose", "api", RemoteConfig::new("https://api.dev/mcp"));
    assert_eq!(http["type"], json!("streamable_http"));
    assert_eq!(http["uri"], json!("https://api.dev/mcp"));

    let sse = entry("goose", "events", RemoteConfig::new("https://api.dev/sse"));
    assert_eq!(sse["type"], json!("sse"));
}

#[test]
fn goose_serializes_as_yaml() {
    let registry = GeneratorRegistry::default();
    let goose = registry.require("goose").unwrap();
    let text = goose
        .serialize(&goose.generate("fetch", &StdioConfig::new("uvx").into()).unwrap())
        .unwrap();

    assert!(text.starts_with("extensions:\n"), "{text}");
    assert!(text.contains("cmd: uvx"), "{text}");
}

#[test]
fn gemini_picks_url_key_by_transport() {
    let http = entry(
        "gemini-cli",
        "api",
        RemoteConfig::new("https://api.dev/mcp").with_timeout_ms(5_000),
    );
    assert_eq!(http, json!({"httpUrl": "https://api.dev/mcp", "timeout": 5000}));

    let sse = entry("gemini-cli", "events", RemoteConfig::new("https://api.dev/sse"));
    assert_eq!(sse, json!({"url": "https://api.dev/sse"}));
}

#[test]
fn opencode_uses_array_command_and_local_remote_types() {
    let stdio = entry(
        "opencode",
        "fs",
        StdioConfig::new("npx")
            .with_args(["-y", "pkg"])
            .with_env("TOKEN", "t"),
    );
    assert_eq!(
        stdio,
        json!({
            "type": "local",
            "command": ["npx", "-y", "pkg"],
            "environment": {"TOKEN": "t"},
            "enabled": true
        })
    );

    let remote = entry("opencode", "api", RemoteConfig::new("https://api.dev/sse"));
    assert_eq!(
        remote,
        json!({"type": "remote", "url": "https://api.dev/sse", "enabled": true})
    );
}

#[test]
fn opencode_generate_all_adds_schema_marker() {
    let registry = GeneratorRegistry::default();
    let opencode = registry.require("opencode").unwrap();
    let mut servers = BTreeMap::new();
    servers.insert("a".to_string(), StdioConfig::new("a").into());
    servers.insert("b".to_string(), RemoteConfig::new("https://b.dev").into());

    let document = opencode.generate_all(&servers).unwrap();

    let keys: Vec<&str> = document.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["$schema", "mcp"]);
    assert_eq!(document["$schema"], json!("https://opencode.ai/config.json"));
    assert_eq!(document["mcp"].as_object().unwrap().len(), 2);
}

#[test]
fn generate_all_without_schema_has_only_root() {
    let registry = GeneratorRegistry::default();
    let cursor = registry.require("cursor").unwrap();
    let mut servers = BTreeMap::new();
    servers.insert("a".to_string(), StdioConfig::new("a").into());

    let document = cursor.generate_all(&servers).unwrap();

    assert_eq!(
        Value::Object(document),
        json!({"mcpServers": {"a": {"command": "a"}}})
    );
}

#[test]
fn kiro_and_droid_static_fields() {
    let kiro = entry("kiro", "fs", StdioConfig::new("npx"));
    assert_eq!(
        kiro,
        json!({"command": "npx", "disabled": false, "autoApprove": []})
    );

    let droid = entry("droid", "api", RemoteConfig::new("https://api.dev/mcp"));
    assert_eq!(
        droid,
        json!({"type": "http", "url": "https://api.dev/mcp", "disabled": false})
    );
}

#[test]
fn copilot_cli_labels_stdio_as_local() {
    let stdio = entry("github-copilot-cli", "fs", StdioConfig::new("npx"));
    assert_eq!(
        stdio,
        json!({"type": "local", "command": "npx", "tools": ["*"]})
    );

    let sse = entry("github-copilot-cli", "ev", RemoteConfig::new("https://x.dev/sse"));
    assert_eq!(sse["type"], json!("sse"));
}

#[test]
fn untyped_apps_never_write_type() {
    for app in ["claude-desktop", "cursor", "windsurf", "zed", "codex", "gemini-cli", "kiro", "lm-studio"] {
        let remote = entry(app, "x", RemoteConfig::new("https://x.dev/sse"));
        assert!(remote.get("type").is_none(), "{app}");
    }
}
