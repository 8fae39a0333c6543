//! DocQA CLI
//!
//! Main entry point for the docqa command-line tool.
//! Provides direct chat and question answering over PDF, DOCX and text files.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand, IndexCommand, PromptsCommand};
use docqa_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// DocQA - ask questions about your documents
#[derive(Parser, Debug)]
#[command(name = "docqa")]
#[command(about = "Ask questions about PDF, DOCX and text documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "DOCQA_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "DOCQA_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Chat provider (huggingface)
    #[arg(short, long, global = true, env = "DOCQA_PROVIDER")]
    provider: Option<String>,

    /// Chat model identifier
    #[arg(short, long, global = true, env = "DOCQA_MODEL")]
    model: Option<String>,

    /// Embedding provider (huggingface, mock)
    #[arg(long, global = true, env = "DOCQA_EMBEDDING_PROVIDER")]
    embedding_provider: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Chat with the model directly
    Chat(ChatCommand),

    /// Index a document and report its chunks
    Index(IndexCommand),

    /// Ask questions about a document
    Ask(AskCommand),

    /// List available prompts
    Prompts(PromptsCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment and config file
    let mut config = AppConfig::load()?;

    // A --config flag not already picked up from the environment is merged here
    if let Some(ref path) = cli.config {
        if config.config_file.as_ref() != Some(path) {
            config = config.merge_yaml(path)?;
        }
    }

    let config = config.with_overrides(
        cli.workspace,
        cli.config,
        cli.provider,
        cli.model,
        cli.embedding_provider,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("DocQA CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {} (model: {})", config.provider, config.model);
    tracing::debug!(
        "Embeddings: {} (model: {})",
        config.embedding_provider,
        config.embedding_model
    );

    config.validate()?;

    let command_name = match &cli.command {
        Commands::Chat(_) => "chat",
        Commands::Index(_) => "index",
        Commands::Ask(_) => "ask",
        Commands::Prompts(_) => "prompts",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Index(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Prompts(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!(code = e.code(), "Command failed: {}", e),
    }

    result
}
