//! Command façade over a game session.

use std::sync::Arc;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::error::LadderError;
use super::lifelines::LifelineEngine;
use super::pool::QuestionPool;
use super::session::GameSession;
use super::types::OptionLabel;
use super::view::GameView;

/// A player command, as sent by a presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum GameCommand {
    /// Start over with a fresh session.
    Start,
    /// Answer the current question.
    Answer {
        /// Selected option.
        option: OptionLabel,
    },
    /// Continue after a correct answer.
    Advance,
    /// Stop and bank the guaranteed prize.
    Stop,
    /// Skip the current question.
    Skip,
    /// Ask the audience.
    UseAudience,
    /// Draw an elimination card.
    UseElimination,
    /// Ask the AI assistant.
    UseAi,
}

/// Translates commands into session transitions and returns view snapshots.
#[derive(Debug)]
pub struct GameController<R = StdRng> {
    pool: Arc<QuestionPool>,
    session: GameSession,
    lifelines: LifelineEngine<R>,
}

impl<R: Rng> GameController<R> {
    /// Starts a game drawn from `pool`, using `rng` for sampling and card draws.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::InsufficientQuestions`] if the pool is too small.
    #[instrument(skip(pool, rng), fields(pool_size = pool.len()))]
    pub fn start(pool: Arc<QuestionPool>, rng: R) -> Result<Self, LadderError> {
        let mut lifelines = LifelineEngine::new(rng);
        let session = GameSession::initialize(&pool, lifelines.rng_mut())?;
        info!("Game controller ready");
        Ok(Self {
            pool,
            session,
            lifelines,
        })
    }

    /// The active session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Snapshot of the active session.
    pub fn view(&self) -> GameView {
        GameView::from_session(&self.session)
    }

    /// Dispatches `command` and returns the resulting view.
    ///
    /// # Errors
    ///
    /// Returns the [`LadderError`] of the rejected command; the session is unchanged.
    #[instrument(skip(self), fields(position = self.session.position()))]
    pub fn execute(&mut self, command: GameCommand) -> Result<GameView, LadderError> {
        debug!(?command, "Executing command");
        let result = match command {
            GameCommand::Start => self.restart(),
            GameCommand::Answer { option } => self.answer(option),
            GameCommand::Advance => self.advance(),
            GameCommand::Stop => self.stop(),
            GameCommand::Skip => self.skip(),
            GameCommand::UseAudience => self.use_audience(),
            GameCommand::UseElimination => self.use_elimination(),
            GameCommand::UseAi => self.use_ai(),
        };
        if let Err(e) = &result {
            warn!(?command, error = %e, "Command rejected");
        }
        result
    }

    /// Replaces the session with a freshly drawn one.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::InsufficientQuestions`] if the pool is too small;
    /// the current session is kept.
    pub fn restart(&mut self) -> Result<GameView, LadderError> {
        self.session = GameSession::initialize(&self.pool, self.lifelines.rng_mut())?;
        info!("Game restarted");
        Ok(self.view())
    }

    /// Answers the current question.
    ///
    /// # Errors
    ///
    /// See [`GameSession::answer`].
    pub fn answer(&mut self, option: OptionLabel) -> Result<GameView, LadderError> {
        self.session.answer(option)?;
        Ok(self.view())
    }

    /// Continues to the next question.
    ///
    /// # Errors
    ///
    /// See [`GameSession::advance`].
    pub fn advance(&mut self) -> Result<GameView, LadderError> {
        self.session.advance()?;
        Ok(self.view())
    }

    /// Stops the game.
    ///
    /// # Errors
    ///
    /// See [`GameSession::stop`].
    pub fn stop(&mut self) -> Result<GameView, LadderError> {
        self.session.stop()?;
        Ok(self.view())
    }

    /// Skips the current question.
    ///
    /// # Errors
    ///
    /// See [`GameSession::skip`].
    pub fn skip(&mut self) -> Result<GameView, LadderError> {
        self.session.skip()?;
        Ok(self.view())
    }

    /// Uses the audience lifeline.
    ///
    /// # Errors
    ///
    /// See [`LifelineEngine::use_audience`].
    pub fn use_audience(&mut self) -> Result<GameView, LadderError> {
        self.lifelines.use_audience(&mut self.session)?;
        Ok(self.view())
    }

    /// Uses the elimination lifeline.
    ///
    /// # Errors
    ///
    /// See [`LifelineEngine::use_elimination`].
    pub fn use_elimination(&mut self) -> Result<GameView, LadderError> {
        self.lifelines.use_elimination(&mut self.session)?;
        Ok(self.view())
    }

    /// Uses the AI lifeline.
    ///
    /// # Errors
    ///
    /// See [`LifelineEngine::use_ai`].
    pub fn use_ai(&mut self) -> Result<GameView, LadderError> {
        self.lifelines.use_ai(&mut self.session)?;
        Ok(self.view())
    }
}
