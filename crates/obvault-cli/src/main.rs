//! obvault CLI: Obsidian vault over MCP
//!
//! Commands: serve (default), list, read, write, rm, search, meta

use std::io::Read as _;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rmcp::ServiceExt;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use obvault_core::frontmatter;
use obvault_core::note::{DeleteOutcome, ReadOutcome, WriteOutcome};
use obvault_mcp::{format, ObvaultMcpService};
use obvault_vault::{VaultConfig, VaultService};

#[derive(Parser)]
#[command(name = "obvault")]
#[command(version)]
#[command(about = "Obsidian vault server for AI agents")]
struct Cli {
    /// Vault root directory [default: ~/Documents/Obsidian]
    #[arg(long, global = true, env = "OBSIDIAN_VAULT_PATH")]
    vault: Option<PathBuf>,

    /// Disable write and delete operations
    #[arg(long, global = true)]
    readonly: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the MCP server on stdio
    Serve,
    /// List notes, optionally under a folder
    #[command(alias = "ls")]
    List { folder: Option<String> },
    /// Print a note
    Read {
        path: String,
        /// Print only the body after the frontmatter block
        #[arg(long)]
        body: bool,
    },
    /// Create or overwrite a note (content from --content or stdin)
    Write {
        path: String,
        /// Note content; may start with `-` (frontmatter, list items)
        #[arg(long, allow_hyphen_values = true)]
        content: Option<String>,
    },
    /// Delete a note
    #[command(alias = "delete")]
    Rm { path: String },
    /// Case-insensitive full-text search
    #[command(alias = "s")]
    Search { query: String },
    /// Print a note's frontmatter as JSON
    Meta { path: String },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr; stdout belongs to the stdio transport.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = vault_config(&cli)?;
    let vault = VaultService::open(config.clone())
        .with_context(|| format!("cannot open vault at {}", config.root.display()))?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            serve(Arc::new(vault)).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::List { folder } => {
            let notes = vault.list_notes(folder.as_deref())?;
            println!("{}", format::json(&notes)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Read { path, body } => match vault.read_note(&path)? {
            ReadOutcome::Found(content) => {
                let text = if body {
                    frontmatter::split(&content).map_or(content.as_str(), |(_, body)| body)
                } else {
                    content.as_str()
                };
                print!("{text}");
                Ok(ExitCode::SUCCESS)
            }
            ReadOutcome::NotFound => {
                println!("{}", format::not_found(&path));
                Ok(ExitCode::FAILURE)
            }
        },
        Commands::Write { path, content } => {
            let content = match content {
                Some(content) => content,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read note content from stdin")?;
                    buf
                }
            };
            let outcome = vault.write_note(&path, &content)?;
            println!("{}", format::write(&path, &outcome));
            if let WriteOutcome::Failed(reason) = &outcome {
                eprintln!("{reason}");
            }
            Ok(exit_code(outcome.is_success()))
        }
        Commands::Rm { path } => {
            let outcome = vault.delete_note(&path)?;
            println!("{}", format::delete(&path, &outcome));
            if let DeleteOutcome::Failed(reason) = &outcome {
                eprintln!("{reason}");
            }
            Ok(exit_code(outcome.is_success()))
        }
        Commands::Search { query } => {
            let results = vault.search_notes(&query);
            println!("{}", format::json(&results)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Meta { path } => {
            let metadata = vault.get_metadata(&path)?;
            println!("{}", format::metadata(&path, metadata.as_ref())?);
            Ok(exit_code(metadata.is_some()))
        }
    }
}

fn vault_config(cli: &Cli) -> Result<VaultConfig> {
    let root = match &cli.vault {
        Some(root) => root.clone(),
        None => {
            let dirs = directories::BaseDirs::new()
                .context("cannot determine home directory; pass --vault")?;
            VaultConfig::default_root(dirs.home_dir())
        }
    };
    Ok(VaultConfig::new(root, cli.readonly))
}

async fn serve(vault: Arc<VaultService>) -> Result<()> {
    info!(
        "Starting obvault MCP server ({}) with vault at: {}",
        vault.config().mode(),
        vault.config().root.display()
    );
    let running = ObvaultMcpService::new(vault)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    running.waiting().await?;
    info!("MCP server stopped");
    Ok(())
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
