//! File-backed tests for merging, removing and listing servers.

use std::fs;

use serde_json::{Value, json};
use tempfile::TempDir;
use tether_core::client::{ConfigGenerator, GeneratorRegistry};
use tether_core::config::{
    ConfigFormat, Document, list_servers_in_config, merge_server_into_config, read_config,
    remove_server_from_config, write_config,
};
use tether_core::mcp::{RemoteConfig, StdioConfig};

fn document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn merge_into_missing_file_creates_document() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("nested/dir/mcp.json");
    let generated = document(json!({"mcpServers": {"a": {"command": "npx"}}}));

    let merged = merge_server_into_config(&path, ConfigFormat::Json, &generated).unwrap();
    assert_eq!(merged, generated);

    write_config(&path, ConfigFormat::Json, &merged).unwrap();
    assert!(path.exists());
}

#[test]
fn merge_into_empty_file_treats_it_as_empty_document() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("config.yaml");
    fs::write(&path, "   \n").unwrap();
    let generated = document(json!({"extensions": {"a": {"cmd": "npx"}}}));

    let merged = merge_server_into_config(&path, ConfigFormat::Yaml, &generated).unwrap();
    assert_eq!(merged, generated);
}

#[test]
fn merge_preserves_sibling_servers_and_unrelated_keys() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("claude_desktop_config.json");
    fs::write(
        &path,
        r#"{"mcpServers": {"a": {"command": "old"}}, "other": true, "theme": {"dark": 1}}"#,
    )
    .unwrap();
    let generated = document(json!({"mcpServers": {"b": {"url": "https://b.dev"}}}));

    let merged = merge_server_into_config(&path, ConfigFormat::Json, &generated).unwrap();

    assert_eq!(
        Value::Object(merged),
        json!({
            "mcpServers": {"a": {"command": "old"}, "b": {"url": "https://b.dev"}},
            "other": true,
            "theme": {"dark": 1}
        })
    );
}

#[test]
fn merge_replaces_whole_entry_without_field_patching() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("mcp.json");
    fs::write(
        &path,
        r#"{"mcpServers": {"a": {"command": "old", "args": ["--stale"], "env": {"X": "1"}}}}"#,
    )
    .unwrap();
    let generated = document(json!({"mcpServers": {"a": {"command": "new"}}}));

    let merged = merge_server_into_config(&path, ConfigFormat::Json, &generated).unwrap();

    assert_eq!(merged["mcpServers"]["a"], json!({"command": "new"}));
}

#[test]
fn merging_twice_matches_merging_once() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("mcp.json");
    fs::write(&path, r#"{"mcpServers": {"keep": {"command": "x"}}, "v": 2}"#).unwrap();

    let registry = GeneratorRegistry::default();
    let generator = registry.require("cursor").unwrap();
    let generated = generator
        .generate("fs", &StdioConfig::new("npx").with_args(["-y"]).into())
        .unwrap();

    let once = merge_server_into_config(&path, ConfigFormat::Json, &generated).unwrap();
    write_config(&path, ConfigFormat::Json, &once).unwrap();
    let after_first = fs::read_to_string(&path).unwrap();

    let twice = merge_server_into_config(&path, ConfigFormat::Json, &generated).unwrap();
    write_config(&path, ConfigFormat::Json, &twice).unwrap();
    let after_second = fs::read_to_string(&path).unwrap();

    assert_eq!(once, twice);
    assert_eq!(after_first, after_second);
}

#[test]
fn merge_keeps_jsonc_settings_but_drops_comments() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("settings.json");
    fs::write(
        &path,
        "{\n  // editor settings\n  \"vim_mode\": true,\n  /* servers */\n  \"context_servers\": {}\n}\n",
    )
    .unwrap();

    let registry = GeneratorRegistry::default();
    let zed = registry.require("zed").unwrap();
    let generated = zed
        .generate(
            "docs",
            &RemoteConfig::new("https://docs.example.com/mcp").into(),
        )
        .unwrap();

    let merged = merge_server_into_config(&path, ConfigFormat::Jsonc, &generated).unwrap();
    write_config(&path, ConfigFormat::Jsonc, &merged).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains("editor settings"));
    let reread = read_config(&path, ConfigFormat::Jsonc).unwrap();
    assert_eq!(reread["vim_mode"], json!(true));
    assert_eq!(
        reread["context_servers"]["docs"]["url"],
        json!("https://docs.example.com/mcp")
    );
}

#[test]
fn remove_returns_none_and_leaves_file_untouched_when_absent() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("mcp.json");
    let original = "{\"mcpServers\":{\"a\":{\"command\":\"x\"}},\"name\":\"ghost\"}";
    fs::write(&path, original).unwrap();

    let result = remove_server_from_config(&path, ConfigFormat::Json, "ghost").unwrap();

    assert!(result.is_none());
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn remove_from_missing_file_is_none() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("absent.toml");

    let result = remove_server_from_config(&path, ConfigFormat::Toml, "x").unwrap();

    assert!(result.is_none());
    assert!(!path.exists());
}

#[test]
fn remove_deletes_entry_from_every_section() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("mixed.json");
    fs::write(
        &path,
        r#"{
            "mcpServers": {"x": {"command": "a"}, "y": {"command": "b"}},
            "servers": {"x": {"url": "https://x.dev"}},
            "custom": {"x": 1},
            "x": "top-level scalar is not a section"
        }"#,
    )
    .unwrap();

    let updated = remove_server_from_config(&path, ConfigFormat::Json, "x")
        .unwrap()
        .expect("x was present");

    assert_eq!(
        Value::Object(updated),
        json!({
            "mcpServers": {"y": {"command": "b"}},
            "servers": {},
            "custom": {},
            "x": "top-level scalar is not a section"
        })
    );
}

#[test]
fn list_reports_servers_across_recognized_roots() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "mcpServers": {"a": {}, "b": {}},
            "mcp": {"c": {}},
            "plugins": {"ignored": {}},
            "servers": ["not", "an", "object"]
        }"#,
    )
    .unwrap();

    let servers = list_servers_in_config(&path, ConfigFormat::Json).unwrap();

    assert_eq!(servers, vec!["a", "b", "c"]);
}

#[test]
fn list_of_missing_file_is_empty() {
    let temp = TempDir::new().expect("create temp dir");
    let servers =
        list_servers_in_config(&temp.path().join("nope.yaml"), ConfigFormat::Yaml).unwrap();
    assert!(servers.is_empty());
}

#[test]
fn parse_error_carries_path() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let err = merge_server_into_config(&path, ConfigFormat::Json, &Document::new()).unwrap_err();

    assert!(err.is_parse());
    assert!(err.to_string().contains("broken.json"), "{err}");
}

#[test]
fn non_utf8_file_is_parse_error_with_path() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("settings.json");
    fs::write(&path, b"{\"theme\": \"\xff\"}").unwrap();

    let err = read_config(&path, ConfigFormat::Jsonc).unwrap_err();

    assert!(err.is_parse(), "{err}");
    assert!(err.to_string().contains("settings.json"), "{err}");
}

#[test]
fn non_mapping_root_is_parse_error() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("list.yaml");
    fs::write(&path, "- a\n- b\n").unwrap();

    let err = list_servers_in_config(&path, ConfigFormat::Yaml).unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn goose_yaml_merge_keeps_other_extensions() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("config.yaml");
    fs::write(
        &path,
        "GOOSE_PROVIDER: openai\nextensions:\n  developer:\n    name: developer\n    type: builtin\n    enabled: true\n",
    )
    .unwrap();

    let registry = GeneratorRegistry::default();
    let goose = registry.require("goose").unwrap();
    let generated = goose
        .generate(
            "fetch",
            &StdioConfig::new("uvx").with_args(["mcp-server-fetch"]).into(),
        )
        .unwrap();

    let merged = merge_server_into_config(&path, ConfigFormat::Yaml, &generated).unwrap();
    write_config(&path, ConfigFormat::Yaml, &merged).unwrap();

    let servers = list_servers_in_config(&path, ConfigFormat::Yaml).unwrap();
    assert_eq!(servers, vec!["developer", "fetch"]);
    let reread = read_config(&path, ConfigFormat::Yaml).unwrap();
    assert_eq!(reread["GOOSE_PROVIDER"], json!("openai"));
    assert_eq!(reread["extensions"]["fetch"]["cmd"], json!("uvx"));
}
