use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "vaultype")]
#[command(about = "Voice command mode - say the wake phrase, then a command")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.vaultype/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse text into command(s) and print them as JSON
    Parse {
        /// The command text, e.g. "open Safari and then mute"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Read transcript lines from stdin and run them in a dry-run session
    Listen {
        /// Answer yes to every confirmation prompt
        #[arg(long)]
        assume_yes: bool,
    },

    /// List known intents and whether they are enabled
    Intents {
        /// Only show one category (app, window, system, workflow)
        #[arg(long)]
        category: Option<String>,
    },

    /// Enable a disabled intent
    Enable {
        /// Intent name, e.g. lockScreen
        intent: String,
    },

    /// Disable an intent so it is never executed
    Disable {
        /// Intent name, e.g. lockScreen
        intent: String,
    },

    /// Write a default ~/.vaultype/config.toml
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config;

    match cli.command {
        Some(Commands::Parse { text }) => {
            cli::parse::parse_command(config_path.as_deref(), &text.join(" ")).await?;
        }
        Some(Commands::Listen { assume_yes }) => {
            cli::listen::listen_command(config_path.as_deref(), assume_yes).await?;
        }
        Some(Commands::Intents { category }) => {
            cli::intents::intents_command(config_path.as_deref(), category)?;
        }
        Some(Commands::Enable { intent }) => {
            cli::toggle::toggle_command(config_path, &intent, true)?;
        }
        Some(Commands::Disable { intent }) => {
            cli::toggle::toggle_command(config_path, &intent, false)?;
        }
        Some(Commands::Init { force }) => {
            cli::init::init_command(config_path, force)?;
        }
        None => {
            // Default: listen on stdin
            cli::listen::listen_command(config_path.as_deref(), false).await?;
        }
    }

    Ok(())
}
