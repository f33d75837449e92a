//! Strictly Millions library - a trivia prize-ladder game
//!
//! The player climbs eleven questions of increasing value, may stop to
//! bank their winnings, and loses most of them on a wrong answer. The
//! last question pays the million, all or nothing.
//!
//! # Architecture
//!
//! - **Games**: the ladder state machine, prize rules and lifelines
//! - **Questions**: loading question banks from files or HTTP
//! - **Session**: many independent games for the HTTP host
//! - **Server**: JSON API over axum
//! - **TUI**: single-player terminal client
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use strictly_millions::{GameController, OptionLabel, source_for};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let pool = source_for("assets/questions.toml").fetch_pool().await?;
//! let mut game = GameController::start(Arc::new(pool), StdRng::seed_from_u64(1))?;
//! let view = game.answer(OptionLabel::A)?;
//! println!("banked {}", view.accumulated);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod questions;
mod server;
mod session;
mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, DEFAULT_CONFIG_PATH, GameConfig, ServerConfig};

// Crate-level exports - Question sources
pub use questions::{
    BankFormat, FileSource, HttpSource, QuestionSource, QuestionSourceError, parse_bank,
    source_for,
};

// Crate-level exports - Server
pub use server::{ApiError, CreateGameRequest, CreateGameResponse, ErrorBody, router, serve};

// Crate-level exports - Session management
pub use session::{DEFAULT_MAX_SESSIONS, SessionError, SessionId, SessionManager};

// Crate-level exports - Terminal client
pub use tui::run_tui;

// Crate-level exports - Game types (prize ladder)
pub use games::ladder::{
    AnswerFeedback, Elimination, EliminationCard, FeedbackOutcome, GameCommand, GameController,
    GameSession, GameStatus, GameView, Hint, LADDER, LadderError, Lifeline, LifelineAvailability,
    LifelineEngine, MILLION_POSITION, OptionLabel, PrizeLadder, Question, QuestionOptions,
    QuestionPool, QuestionView, REGULAR_QUESTIONS, STARTING_SKIPS, TOTAL_QUESTIONS,
    TerminationReason, VisibleOption,
};
