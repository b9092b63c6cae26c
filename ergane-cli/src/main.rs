//! Ergane CLI - Local harness for the editor-automation tools
//!
//! Lists tools, shows their schemas and performs single invocations from a
//! JSON argument string. Outcomes are printed as JSON on stdout; this binary
//! is a development harness, not the wire transport.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use ergane_core::prelude::*;

#[derive(Parser)]
#[command(name = "ergane")]
#[command(about = "Ergane editor-automation tool harness", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered tools
    List {
        /// Print full descriptors as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one tool's description and input schema
    Describe {
        /// Tool name
        tool: String,
    },
    /// Invoke a tool with a JSON argument object
    Invoke {
        /// Tool name
        tool: String,
        /// Arguments as a JSON object, e.g. '{"action": "list"}'
        #[arg(default_value = "{}")]
        args: String,
    },
    /// Show the resolved configuration
    Config,
    /// Version information
    Version,
}

fn build_registry(config: &ErganeConfig) -> Result<ToolRegistry> {
    let project = MemoryProject::shared(config.project.name.clone());
    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry, project)?;

    if let Some(allowlist) = &config.tools.allowlist {
        registry.retain_allowed(allowlist);
    }
    Ok(registry)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ErganeConfig::load()?;

    match cli.command {
        Commands::List { json } => {
            let registry = build_registry(&config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&registry.descriptors())?);
            } else {
                for descriptor in registry.descriptors() {
                    println!("{:<12} {}", descriptor.name, descriptor.description);
                }
            }
        }
        Commands::Describe { tool } => {
            let registry = build_registry(&config)?;
            let tool = registry
                .get(&tool)
                .with_context(|| format!("tool '{}' not found", tool))?;
            println!("{} - {}", tool.name(), tool.description());
            println!("{}", serde_json::to_string_pretty(&tool.input_schema())?);
        }
        Commands::Invoke { tool, args } => {
            let registry = build_registry(&config)?;
            let value: serde_json::Value =
                serde_json::from_str(&args).context("arguments are not valid JSON")?;
            let bag = ArgumentBag::from_value(value)?;

            let outcome = registry.invoke(&tool, bag).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            if outcome.is_error() {
                std::process::exit(1);
            }
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Version => {
            println!("ergane {}", env!("CARGO_PKG_VERSION"));
            println!("ergane-core {}", ergane_core::VERSION);
        }
    }

    Ok(())
}
