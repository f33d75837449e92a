//! Command-line interface for strictly_millions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use strictly_millions::DEFAULT_CONFIG_PATH;

/// Strictly Millions - trivia prize ladder
#[derive(Parser, Debug)]
#[command(name = "strictly_millions")]
#[command(about = "Answer eleven questions, climb the ladder, win the million", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file (optional)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play {
        /// Question bank path or URL (overrides config)
        #[arg(short, long)]
        questions: Option<String>,

        /// RNG seed for reproducible games (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// File receiving log output while the TUI owns the screen
        #[arg(long, default_value = "strictly_millions.log")]
        log_file: PathBuf,
    },

    /// Run the HTTP game server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Question bank path or URL (overrides config)
        #[arg(short, long)]
        questions: Option<String>,

        /// Base RNG seed for reproducible sessions (overrides config)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Load the question bank and report whether a game can start
    Check {
        /// Question bank path or URL (overrides config)
        #[arg(short, long)]
        questions: Option<String>,
    },
}
