//! proto-docs CLI
//!
//! Renders messages, enums and services of a `.proto` file as Markdown
//! tables, the same output the documentation site embeds.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use markdown_generator::{DocsConfig, DocsEnv};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_MKDOCS_CONFIG: &str = "mkdocs.yml";

#[derive(Parser)]
#[command(name = "proto-docs")]
#[command(version, about = "Render .proto definitions as Markdown tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// MkDocs config to read docs_dir from (defaults to ./mkdocs.yml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Documentation source directory; proto paths resolve against its parent
    #[arg(long, global = true)]
    docs_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the field table of a message
    #[command(after_help = "EXAMPLES:\n  \
        proto-docs message Task\n  \
        proto-docs message SendMessageRequest --proto specification/a2a.proto")]
    Message {
        /// Message name, searched in nested messages too
        name: String,

        /// Proto file relative to the docs site root
        #[arg(short, long)]
        proto: Option<String>,
    },

    /// Render the value table of an enum
    Enum {
        /// Enum name
        name: String,

        /// Proto file relative to the docs site root
        #[arg(short, long)]
        proto: Option<String>,
    },

    /// Render the method table of a service
    Service {
        /// Service name
        name: String,

        /// Proto file relative to the docs site root
        #[arg(short, long)]
        proto: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("{} failed to initialize logging: {e}", "warning:".yellow().bold());
    }

    match run(cli) {
        Ok(markdown) => {
            println!("{markdown}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let config = load_config(cli.config.as_deref(), cli.docs_dir)?;
    tracing::debug!(docs_dir = %config.docs_dir.display(), "using docs config");
    let env = DocsEnv::new(config);

    let markdown = match cli.command {
        Commands::Message { name, proto } => env
            .proto_to_table(&name, proto.as_deref())
            .with_context(|| format!("Failed to render message {name}"))?,
        Commands::Enum { name, proto } => env.proto_enum_to_table(&name, proto.as_deref()),
        Commands::Service { name, proto } => env.proto_service_to_table(&name, proto.as_deref()),
    };
    Ok(markdown)
}

fn load_config(config: Option<&Path>, docs_dir: Option<PathBuf>) -> Result<DocsConfig> {
    let mut docs_config = match config {
        Some(path) => DocsConfig::from_mkdocs_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None if Path::new(DEFAULT_MKDOCS_CONFIG).exists() => {
            DocsConfig::from_mkdocs_file(DEFAULT_MKDOCS_CONFIG)
                .with_context(|| format!("Failed to load {DEFAULT_MKDOCS_CONFIG}"))?
        }
        None => DocsConfig::default(),
    };

    if let Some(dir) = docs_dir {
        docs_config.docs_dir = dir;
    }
    Ok(docs_config)
}

// Logs go to stderr so stdout carries only the rendered Markdown.
fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_level(true),
        )
        .try_init()?;
    Ok(())
}
