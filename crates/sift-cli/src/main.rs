//! Sift CLI - Document ingestion, normalization and chunking.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Sift - Turn heterogeneous documents into retrievable chunks
#[derive(Parser)]
#[command(name = "sift")]
#[command(version)]
#[command(about = "Turn heterogeneous documents into retrievable chunks", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the configuration file (defaults to the platform location)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize sift (create the default config file)
    Init,

    /// Process a file or directory into chunks
    Process {
        /// File or directory to process
        path: PathBuf,

        /// Recurse into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Override the configured splitting method
        #[arg(short, long)]
        method: Option<String>,
    },

    /// Split an already-extracted text file and print the chunks
    Split {
        /// Text file to split
        file: PathBuf,

        /// Override the configured splitting method
        #[arg(short, long)]
        method: Option<String>,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the active configuration
    Show,
    /// Print the configuration file path
    Path,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "sift=debug" } else { "sift=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Process {
            path,
            recursive,
            method,
        } => commands::process::run(config, &path, recursive, method),
        Commands::Split { file, method } => commands::split::run(config, &file, method),
        Commands::Config(ConfigCommands::Show) => commands::config::show(&config),
        Commands::Config(ConfigCommands::Path) => commands::config::path(),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<sift_config::Config> {
    let config = match path {
        Some(path) => sift_config::Config::load_from(path)?,
        None => sift_config::Config::load()?,
    };
    Ok(config)
}
