use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use heroreel_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "heroreel")]
#[command(author, version, about = "A hero slider for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of ~/.config/heroreel/config.toml
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Show the configured slides, stats and timing
    List,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Run the carousel headless and print every slide change
    Watch {
        /// Stop after this many seconds (default: until Ctrl-C)
        #[arg(short, long)]
        seconds: Option<u64>,
        /// Print one JSON object per line
        #[arg(long)]
        json: bool,
    },
}

/// Where log lines go
enum LogTarget {
    Stderr,
    /// The TUI owns the terminal, so log to `heroreel.log` in the data dir
    File,
}

fn init_logging(config: &AppConfig, target: LogTarget) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    match target {
        LogTarget::Stderr => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogTarget::File => {
            std::fs::create_dir_all(config.data_dir())?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(config.log_path())?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init()
        }
    }

    Ok(())
}

/// Load configuration from `--config` or the default location
fn load_config(path: Option<&Path>) -> Result<Arc<AppConfig>> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    Ok(Arc::new(config))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let config = load_config(cli.config.as_deref())?;
            init_logging(&config, LogTarget::File)?;
            commands::run::run(config)
        }
        Commands::List => {
            let config = load_config(cli.config.as_deref())?;
            init_logging(&config, LogTarget::Stderr)?;
            commands::list::run(&config)
        }
        Commands::Init { force } => {
            // the existing file may not parse, so don't load it
            init_logging(&AppConfig::default(), LogTarget::Stderr)?;
            commands::init::run(cli.config.as_deref(), force)
        }
        Commands::Watch { seconds, json } => {
            let config = load_config(cli.config.as_deref())?;
            init_logging(&config, LogTarget::Stderr)?;
            commands::watch::run(config, seconds, json).await
        }
    }
}
