//! Tether - MCP client config generator
//!
//! Usage:
//!   tether apps                          # List supported client apps
//!   tether preview <app> <name> ...      # Print the generated entry
//!   tether add <app> <name> ...          # Merge a server into the app's config
//!   tether remove <name> --app <app>     # Remove a server from a config file
//!   tether list --app <app>              # List configured servers

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value, json};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tether_core::client::{ClientContext, ConfigGenerator, GeneratorRegistry};
use tether_core::config::{
    ConfigFormat, Document, list_servers_in_config, merge_server_into_config,
    remove_server_from_config, serialize_document, write_config,
};
use tether_core::mcp::Transport;

#[derive(Parser)]
#[command(name = "tether")]
#[command(about = "Generate and merge MCP server configs for client apps", long_about = None)]
struct Cli {
    /// Resolve app config paths against this home directory
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported client apps
    Apps {
        /// Only show apps that appear to be installed
        #[arg(long)]
        installed: bool,
    },

    /// Print the config an app would receive, without touching any file
    Preview {
        /// App id (see `tether apps`)
        app: String,
        /// Server name
        name: String,
        #[command(flatten)]
        server: ServerArgs,
    },

    /// Merge a server into an app's config file
    Add {
        /// App id (see `tether apps`)
        app: String,
        /// Server name
        name: String,
        #[command(flatten)]
        server: ServerArgs,
        #[command(flatten)]
        file: FileArgs,
        /// Print the merged file instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove a server from a config file
    #[command(alias = "rm")]
    Remove {
        /// Server name
        name: String,
        /// App whose config file to edit
        #[arg(long)]
        app: Option<String>,
        #[command(flatten)]
        file: FileArgs,
    },

    /// List servers configured in a config file
    #[command(alias = "ls")]
    List {
        /// App whose config file to read
        #[arg(long)]
        app: Option<String>,
        #[command(flatten)]
        file: FileArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Canonical server definition, from flags or a JSON document.
#[derive(Args)]
struct ServerArgs {
    /// Canonical server config as JSON (overrides the other server flags)
    #[arg(long, value_name = "JSON")]
    config_json: Option<String>,

    /// Command to launch a stdio server
    #[arg(long, conflicts_with = "url")]
    command: Option<String>,

    /// Argument passed to the command (repeatable)
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    args: Vec<String>,

    /// Environment variable KEY=VALUE (repeatable)
    #[arg(long = "env", value_name = "KEY=VALUE")]
    env: Vec<String>,

    /// Working directory for the command
    #[arg(long)]
    cwd: Option<String>,

    /// URL of a remote server
    #[arg(long)]
    url: Option<String>,

    /// HTTP header KEY=VALUE (repeatable)
    #[arg(long = "header", value_name = "KEY=VALUE")]
    headers: Vec<String>,

    /// Remote transport (http, streamable-http, sse); inferred from the URL if omitted
    #[arg(long)]
    transport: Option<Transport>,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Human-readable description
    #[arg(long)]
    description: Option<String>,
}

/// Explicit target file overrides.
#[derive(Args)]
struct FileArgs {
    /// Config file to edit instead of the app's default location
    #[arg(long)]
    file: Option<PathBuf>,

    /// File format (json, jsonc, yaml, toml); defaults to the app's format or the file extension
    #[arg(long)]
    format: Option<ConfigFormat>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tether=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let registry = GeneratorRegistry::with_default_generators();
    let ctx = resolve_context(cli.home)?;

    match cli.command {
        Commands::Apps { installed } => run_apps(&registry, &ctx, installed),
        Commands::Preview { app, name, server } => run_preview(&registry, &app, &name, &server),
        Commands::Add {
            app,
            name,
            server,
            file,
            dry_run,
        } => run_add(&registry, &ctx, &app, &name, &server, &file, dry_run),
        Commands::Remove { name, app, file } => {
            run_remove(&registry, &ctx, &name, app.as_deref(), &file)
        }
        Commands::List { app, file, json } => {
            run_list(&registry, &ctx, app.as_deref(), &file, json)
        }
    }
}

fn resolve_context(home: Option<PathBuf>) -> Result<ClientContext> {
    match home {
        Some(home) => Ok(ClientContext::with_home(home)),
        None => ClientContext::from_env()
            .context("Could not determine the home directory; pass --home"),
    }
}

fn run_apps(registry: &GeneratorRegistry, ctx: &ClientContext, installed_only: bool) -> Result<()> {
    println!("{:<20} {:<20} {:<6} Config file", "Id", "Name", "Format");
    println!("{}", "-".repeat(80));

    for generator in registry.all() {
        let installed = generator.detect_installed(ctx);
        if installed_only && !installed {
            continue;
        }
        let target = generator.target();
        let marker = if installed { "*" } else { " " };
        println!(
            "{:<20} {:<20} {:<6} {} {}",
            target.id,
            target.display_name,
            target.format.as_str(),
            target.config_file(ctx).display(),
            marker
        );
    }
    Ok(())
}

fn run_preview(
    registry: &GeneratorRegistry,
    app: &str,
    name: &str,
    server: &ServerArgs,
) -> Result<()> {
    let generator = registry.require(app)?;
    let document = generate(generator, name, server)?;
    print!("{}", generator.serialize(&document)?);
    Ok(())
}

fn run_add(
    registry: &GeneratorRegistry,
    ctx: &ClientContext,
    app: &str,
    name: &str,
    server: &ServerArgs,
    file: &FileArgs,
    dry_run: bool,
) -> Result<()> {
    let generator = registry.require(app)?;
    let document = generate(generator, name, server)?;
    let (path, format) = resolve_file(Some(generator), ctx, file)?;

    let merged = merge_server_into_config(&path, format, &document)
        .with_context(|| format!("Failed to merge into {}", path.display()))?;

    if dry_run {
        print!("{}", serialize_document(&merged, format)?);
        return Ok(());
    }

    write_config(&path, format, &merged)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(app, server = name, path = %path.display(), "added server");
    println!("✓ Added '{}' to {}", name, path.display());
    Ok(())
}

fn run_remove(
    registry: &GeneratorRegistry,
    ctx: &ClientContext,
    name: &str,
    app: Option<&str>,
    file: &FileArgs,
) -> Result<()> {
    let generator = app.map(|id| registry.require(id)).transpose()?;
    let (path, format) = resolve_file(generator, ctx, file)?;

    match remove_server_from_config(&path, format, name)
        .with_context(|| format!("Failed to read {}", path.display()))?
    {
        Some(document) => {
            write_config(&path, format, &document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(server = name, path = %path.display(), "removed server");
            println!("✓ Removed '{}' from {}", name, path.display());
        }
        None => println!("• '{}' is not configured in {}", name, path.display()),
    }
    Ok(())
}

fn run_list(
    registry: &GeneratorRegistry,
    ctx: &ClientContext,
    app: Option<&str>,
    file: &FileArgs,
    as_json: bool,
) -> Result<()> {
    let generator = app.map(|id| registry.require(id)).transpose()?;
    let (path, format) = resolve_file(generator, ctx, file)?;
    let servers = list_servers_in_config(&path, format)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if as_json {
        let output = json!({ "path": path, "servers": servers });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if servers.is_empty() {
        println!("No servers configured in {}", path.display());
    } else {
        println!("Servers in {}:", path.display());
        for server in servers {
            println!("  {server}");
        }
    }
    Ok(())
}

/// Pick the file and format to operate on.
///
/// `--file` beats the app's default path; `--format` beats the app's format,
/// which beats the file extension.
fn resolve_file(
    generator: Option<&dyn ConfigGenerator>,
    ctx: &ClientContext,
    file: &FileArgs,
) -> Result<(PathBuf, ConfigFormat)> {
    let path = match (&file.file, generator) {
        (Some(path), _) => path.clone(),
        (None, Some(generator)) => generator.target().config_file(ctx),
        (None, None) => bail!("Either --app or --file is required"),
    };
    let format = file
        .format
        .or_else(|| generator.map(|g| g.format()))
        .unwrap_or_else(|| ConfigFormat::from_path(&path));
    Ok((path, format))
}

fn generate(generator: &dyn ConfigGenerator, name: &str, server: &ServerArgs) -> Result<Document> {
    let value = match &server.config_json {
        Some(raw) => serde_json::from_str(raw).context("--config-json is not valid JSON")?,
        None => server_value(server)?,
    };
    generator
        .generate_value(name, &value)
        .with_context(|| format!("Invalid server config for '{name}'"))
}

/// Assemble the canonical JSON form from individual flags so it goes through
/// the same validation as `--config-json`.
fn server_value(server: &ServerArgs) -> Result<Value> {
    let mut object = Map::new();
    if let Some(command) = &server.command {
        object.insert("command".into(), json!(command));
    }
    if !server.args.is_empty() {
        object.insert("args".into(), json!(server.args));
    }
    if !server.env.is_empty() {
        object.insert("env".into(), json!(parse_pairs(&server.env, "--env")?));
    }
    if let Some(cwd) = &server.cwd {
        object.insert("cwd".into(), json!(cwd));
    }
    if let Some(url) = &server.url {
        object.insert("url".into(), json!(url));
    }
    if !server.headers.is_empty() {
        object.insert("headers".into(), json!(parse_pairs(&server.headers, "--header")?));
    }
    if let Some(transport) = server.transport {
        object.insert("transport".into(), json!(transport));
    }
    if let Some(timeout_ms) = server.timeout_ms {
        object.insert("timeoutMs".into(), json!(timeout_ms));
    }
    if let Some(description) = &server.description {
        object.insert("description".into(), json!(description));
    }
    Ok(Value::Object(object))
}

fn parse_pairs(raw: &[String], flag: &str) -> Result<BTreeMap<String, String>> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .filter(|(key, _)| !key.is_empty())
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| anyhow!("{flag} expects KEY=VALUE, got '{pair}'"))
        })
        .collect()
}
