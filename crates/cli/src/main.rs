//! Quiesce CLI - qz command

use anyhow::Result;
use clap::{Parser, Subcommand};
use quiesce_core::DispatchOrder;
use tracing_subscriber::EnvFilter;

mod cmd;
mod script;
mod system_config;

/// Quiesce - debounced input and outside-click dismissal, driven from scripts
#[derive(Parser)]
#[command(name = "qz")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay keystrokes against a debounced search box
    Search {
        /// Comma-separated offset_ms:term steps (e.g. "0:a,200:ab,900:abc")
        script: String,
        /// Debounce window in milliseconds (default: from config)
        #[arg(long)]
        window_ms: Option<u64>,
        /// Simulated lookup latency in milliseconds
        #[arg(long, default_value = "0")]
        latency_ms: u64,
        /// Look up the configured initial term before replaying
        #[arg(long)]
        initial: bool,
        /// Print the final results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replay clicks against a dropdown
    Dropdown {
        /// Comma-separated steps: toggle, outside, press, touch, option:<value>, unmount
        script: String,
        /// Dispatch order: local-first or ambient-first (default: from config)
        #[arg(long)]
        order: Option<DispatchOrder>,
    },
    /// View or edit configuration
    Config {
        /// List all values
        #[arg(long)]
        list: bool,
        /// Print one value
        #[arg(long, value_name = "KEY")]
        get: Option<String>,
        /// Set one value
        #[arg(long, num_args = 2, value_names = ["KEY", "VALUE"])]
        set: Option<Vec<String>>,
        /// Print the config file path
        #[arg(long)]
        path: bool,
        /// With --path: create the file with defaults if missing
        #[arg(long, requires = "path")]
        create: bool,
        /// Print an annotated example configuration
        #[arg(long)]
        example: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            script,
            window_ms,
            latency_ms,
            initial,
            json,
        } => cmd::search::run(&script, window_ms, latency_ms, initial, json).await,
        Commands::Dropdown { script, order } => cmd::dropdown::run(&script, order),
        Commands::Config {
            list,
            get,
            set,
            path,
            create,
            example,
        } => {
            if list {
                cmd::config::run_list()
            } else if let Some(key) = get {
                cmd::config::run_get(&key)
            } else if let Some(pair) = set {
                cmd::config::run_set(&pair[0], &pair[1])
            } else if path {
                cmd::config::run_path(create)
            } else if example {
                cmd::config::run_example()
            } else {
                // No flag: same as --list
                cmd::config::run_list()
            }
        }
    }
}
