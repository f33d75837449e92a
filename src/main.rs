//! Strictly Millions - Unified CLI
//!
//! Plays the trivia ladder in the terminal or hosts it over HTTP.

#![warn(missing_docs)]

mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use rand::SeedableRng;
use rand::rngs::StdRng;
use strictly_millions::{
    GameConfig, GameController, LadderError, QuestionPool, SessionManager, TOTAL_QUESTIONS,
    run_tui, serve, source_for,
};
use tracing::{error, info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    match cli.command {
        Command::Play {
            questions,
            seed,
            log_file,
        } => {
            let config = apply_overrides(config, questions, seed);
            initialize_tracing(config.log_filter(), Some(&log_file))?;
            run_play(config).await
        }
        Command::Serve {
            host,
            port,
            questions,
            seed,
        } => {
            let config = apply_overrides(config, questions, seed).with_server(host, port);
            initialize_tracing(config.log_filter(), None)?;
            run_server(config).await
        }
        Command::Check { questions } => {
            let config = apply_overrides(config, questions, None);
            initialize_tracing(config.log_filter(), None)?;
            run_check(config).await
        }
    }
}

fn apply_overrides(config: GameConfig, questions: Option<String>, seed: Option<u64>) -> GameConfig {
    let config = match questions {
        Some(questions) => config.with_questions(questions),
        None => config,
    };
    match seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    }
}

/// Play one terminal session.
#[instrument(skip_all, fields(questions = %config.questions()))]
async fn run_play(config: GameConfig) -> Result<()> {
    let pool = load_pool(&config).await?;
    let rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };
    let controller = GameController::start(pool, rng).map_err(|e| {
        error!(error = %e, "Cannot start a game");
        e
    })?;
    run_tui(controller)
}

/// Run the HTTP game server.
#[instrument(skip_all, fields(questions = %config.questions()))]
async fn run_server(config: GameConfig) -> Result<()> {
    info!("Starting Strictly Millions HTTP server");
    let pool = load_pool(&config).await?;
    ensure_playable(&pool)?;
    let sessions = SessionManager::new(pool, *config.seed())
        .with_max_sessions(*config.server().max_sessions());
    serve(sessions, config.server().host(), *config.server().port()).await
}

/// Load the bank and report whether it can start a game.
#[instrument(skip_all, fields(questions = %config.questions()))]
async fn run_check(config: GameConfig) -> Result<()> {
    let pool = load_pool(&config).await?;
    ensure_playable(&pool)?;
    println!(
        "{}: {} questions, enough for a game of {}",
        config.questions(),
        pool.len(),
        TOTAL_QUESTIONS
    );
    Ok(())
}

async fn load_pool(config: &GameConfig) -> Result<Arc<QuestionPool>> {
    let source = source_for(config.questions());
    let pool = source
        .fetch_pool()
        .await
        .with_context(|| format!("Failed to load questions from {}", source.describe()))?;
    info!(source = %source.describe(), questions = pool.len(), "Question pool ready");
    Ok(Arc::new(pool))
}

fn ensure_playable(pool: &QuestionPool) -> Result<()> {
    if pool.len() < TOTAL_QUESTIONS {
        let err = LadderError::InsufficientQuestions {
            available: pool.len(),
            required: TOTAL_QUESTIONS,
        };
        error!(error = %err, "Question bank too small");
        return Err(err.into());
    }
    Ok(())
}

fn initialize_tracing(default_filter: &str, log_file: Option<&Path>) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    match log_file {
        // Logs to a file so they do not interfere with the TUI
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Arc::new(file))
                        .with_ansi(false),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
    info!("Tracing initialized");
    Ok(())
}
