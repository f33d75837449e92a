//! One-shot lifelines applied to the current question.
//!
//! The audience and the AI assistant always name the correct option; they
//! differ only in presentation. The card draw is the one lifeline with real
//! randomness, drawn from the engine's injected RNG.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::error::LadderError;
use super::session::GameSession;
use super::types::{EliminationCard, Hint, Lifeline, OptionLabel};

/// Result of the elimination lifeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elimination {
    /// Card that was drawn.
    pub card: EliminationCard,
    /// Options removed by this draw.
    pub eliminated: Vec<OptionLabel>,
}

/// Applies lifelines to a [`GameSession`].
#[derive(Debug, Clone)]
pub struct LifelineEngine<R = StdRng> {
    rng: R,
}

impl LifelineEngine<StdRng> {
    /// Engine with a reproducible RNG.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Engine seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> LifelineEngine<R> {
    /// Creates an engine drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// The engine's random source.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Asks the audience. Returns the correct option.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::AlreadyUsed`] on a second call,
    /// [`LadderError::LifelineDisabled`] on the million question, and
    /// [`LadderError::InvalidTransition`] when the session is not accepting commands.
    #[instrument(skip(self, session), fields(position = session.position()))]
    pub fn use_audience(&mut self, session: &mut GameSession) -> Result<OptionLabel, LadderError> {
        let suggestion = suggest(session, Lifeline::Audience)?;
        session.consume_lifeline(Lifeline::Audience, Hint::Audience { suggestion });
        info!(%suggestion, "Audience suggestion given");
        Ok(suggestion)
    }

    /// Asks the virtual assistant. Returns the correct option.
    ///
    /// # Errors
    ///
    /// Same as [`use_audience`](Self::use_audience).
    #[instrument(skip(self, session), fields(position = session.position()))]
    pub fn use_ai(&mut self, session: &mut GameSession) -> Result<OptionLabel, LadderError> {
        let suggestion = suggest(session, Lifeline::Ai)?;
        session.consume_lifeline(Lifeline::Ai, Hint::Ai { suggestion });
        info!(%suggestion, "AI suggestion given");
        Ok(suggestion)
    }

    /// Draws a card and hides that many wrong, still-visible options.
    ///
    /// The correct option is never hidden. If fewer wrong options remain than
    /// the card asks for, all remaining wrong options are hidden.
    ///
    /// # Errors
    ///
    /// Same as [`use_audience`](Self::use_audience).
    #[instrument(skip(self, session), fields(position = session.position()))]
    pub fn use_elimination(&mut self, session: &mut GameSession) -> Result<Elimination, LadderError> {
        session
            .check_lifeline(Lifeline::Cards)
            .inspect_err(|e| warn!(error = %e, "Cards lifeline rejected"))?;
        let question = session.current_question()?;

        let card = EliminationCard::DECK[self.rng.random_range(0..EliminationCard::DECK.len())];
        let mut candidates: Vec<OptionLabel> = question
            .incorrect_options()
            .filter(|label| !session.eliminated().contains(label))
            .collect();
        candidates.shuffle(&mut self.rng);
        candidates.truncate(card.eliminates());
        candidates.sort();

        session.consume_lifeline(
            Lifeline::Cards,
            Hint::Cards {
                card,
                eliminated: candidates.clone(),
            },
        );
        info!(%card, eliminated = ?candidates, "Elimination card drawn");
        Ok(Elimination {
            card,
            eliminated: candidates,
        })
    }
}

fn suggest(session: &GameSession, lifeline: Lifeline) -> Result<OptionLabel, LadderError> {
    session
        .check_lifeline(lifeline)
        .inspect_err(|e| warn!(error = %e, ?lifeline, "Lifeline rejected"))?;
    Ok(*session.current_question()?.correct())
}
