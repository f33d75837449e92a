//! Per-game state machine.
//!
//! A [`GameSession`] owns everything that changes during one game: ladder
//! position, banked prize, lifeline usage and the per-question eliminations.
//! Every mutating operation validates first and only then mutates, so a
//! rejected command leaves the session untouched.

use std::collections::BTreeSet;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::error::LadderError;
use super::pool::QuestionPool;
use super::prize::{self, MILLION_POSITION, PrizeLadder, TOTAL_QUESTIONS};
use super::types::{
    AnswerFeedback, GameStatus, Hint, Lifeline, OptionLabel, Question, TerminationReason,
};

/// Skips granted at the start of every game.
pub const STARTING_SKIPS: u8 = 3;

/// State of a single game, from the first question until it ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSession {
    questions: Vec<Question>,
    position: usize,
    accumulated: u64,
    status: GameStatus,
    skips_remaining: u8,
    lifelines_used: BTreeSet<Lifeline>,
    eliminated: BTreeSet<OptionLabel>,
    hints: Vec<Hint>,
    feedback: Option<AnswerFeedback>,
    awaiting_advance: bool,
}

impl GameSession {
    /// Starts a fresh game by drawing its questions from `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::InsufficientQuestions`] if the pool holds fewer
    /// than [`TOTAL_QUESTIONS`] questions.
    #[instrument(skip(pool, rng), fields(pool_size = pool.len()))]
    pub fn initialize<R: Rng + ?Sized>(
        pool: &QuestionPool,
        rng: &mut R,
    ) -> Result<Self, LadderError> {
        let questions = pool.sample(TOTAL_QUESTIONS, rng)?;
        Self::from_questions(questions)
    }

    /// Starts a fresh game over an already chosen question sequence.
    ///
    /// The last question is the million question.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::InsufficientQuestions`] unless exactly
    /// [`TOTAL_QUESTIONS`] questions are given.
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, LadderError> {
        if questions.len() != TOTAL_QUESTIONS {
            return Err(LadderError::InsufficientQuestions {
                available: questions.len(),
                required: TOTAL_QUESTIONS,
            });
        }
        info!("New game session started");
        Ok(Self {
            questions,
            position: 0,
            accumulated: 0,
            status: GameStatus::InProgress,
            skips_remaining: STARTING_SKIPS,
            lifelines_used: BTreeSet::new(),
            eliminated: BTreeSet::new(),
            hints: Vec::new(),
            feedback: None,
            awaiting_advance: false,
        })
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Current 0-based ladder position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Prize currently banked.
    pub fn accumulated(&self) -> u64 {
        self.accumulated
    }

    /// Lifecycle status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Why the game ended, `None` while it is in progress.
    pub fn termination_reason(&self) -> Option<TerminationReason> {
        match self.status {
            GameStatus::InProgress => None,
            GameStatus::Ended(reason) => Some(reason),
        }
    }

    /// Returns true once the game has ended.
    pub fn is_ended(&self) -> bool {
        matches!(self.status, GameStatus::Ended(_))
    }

    /// Skips still available.
    pub fn skips_remaining(&self) -> u8 {
        self.skips_remaining
    }

    /// Returns true if `lifeline` was consumed this game.
    pub fn is_lifeline_used(&self, lifeline: Lifeline) -> bool {
        self.lifelines_used.contains(&lifeline)
    }

    /// Options hidden for the current question.
    pub fn eliminated(&self) -> &BTreeSet<OptionLabel> {
        &self.eliminated
    }

    /// Lifeline results for the current question.
    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    /// Review snapshot of the last resolved question.
    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.feedback.as_ref()
    }

    /// Returns true after a correct non-final answer until [`advance`](Self::advance).
    pub fn is_awaiting_advance(&self) -> bool {
        self.awaiting_advance
    }

    /// The full question sequence for this game.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Returns true if the current question is the million question.
    pub fn is_million_question(&self) -> bool {
        PrizeLadder::is_million(self.position)
    }

    /// The question at the current position.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::OutOfSequence`] if the position is past the last question.
    pub fn current_question(&self) -> Result<&Question, LadderError> {
        self.questions
            .get(self.position)
            .ok_or(LadderError::OutOfSequence {
                position: self.position,
            })
    }

    /// Prize for answering the current question correctly.
    pub fn prize_at_stake(&self) -> u64 {
        PrizeLadder::prize_at(self.position).unwrap_or(self.accumulated)
    }

    /// What a wrong answer on the current question leaves the player with.
    pub fn forfeit_if_wrong(&self) -> u64 {
        PrizeLadder::forfeit_prize(self, self.position)
    }

    /// Returns true if [`stop`](Self::stop) would be accepted.
    pub fn can_stop(&self) -> bool {
        self.ensure_accepting("stop").is_ok() && self.position > 0
    }

    /// Returns true if [`skip`](Self::skip) would be accepted.
    pub fn can_skip(&self) -> bool {
        self.ensure_accepting("skip").is_ok()
            && !self.is_million_question()
            && self.skips_remaining > 0
    }

    /// Returns true if `lifeline` could be used right now.
    pub fn can_use_lifeline(&self, lifeline: Lifeline) -> bool {
        self.check_lifeline(lifeline).is_ok()
    }

    // ─────────────────────────────────────────────────────────────
    //  Transitions
    // ─────────────────────────────────────────────────────────────

    /// Resolves the current question with the player's selection.
    ///
    /// A correct answer banks the tier prize. On the million question it
    /// wins the game, otherwise the session waits for [`advance`](Self::advance).
    /// A wrong answer ends the game with the forfeit amount.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::InvalidTransition`] if the game has ended, an
    /// advance is pending, or `selected` was hidden by the elimination card.
    #[instrument(skip(self), fields(position = self.position))]
    pub fn answer(&mut self, selected: OptionLabel) -> Result<&AnswerFeedback, LadderError> {
        self.ensure_accepting("answer")?;
        if self.eliminated.contains(&selected) {
            warn!(%selected, "Answer with an eliminated option");
            return Err(LadderError::invalid(format!(
                "option {selected} was eliminated"
            )));
        }
        let question = self.current_question()?.clone();
        let prize = PrizeLadder::prize_at(self.position)?;

        let feedback = AnswerFeedback::answered(question, selected);
        if feedback.is_correct() {
            self.accumulated = prize;
            if self.position == MILLION_POSITION {
                self.status = GameStatus::Ended(TerminationReason::WonMax);
                info!(accumulated = self.accumulated, "Million question answered, game won");
            } else {
                self.awaiting_advance = true;
                info!(accumulated = self.accumulated, "Correct answer");
            }
        } else {
            self.accumulated = prize::forfeit_amount(self.accumulated, self.position);
            self.status = GameStatus::Ended(TerminationReason::Lost);
            info!(accumulated = self.accumulated, "Wrong answer, game lost");
        }

        Ok(&*self.feedback.insert(feedback))
    }

    /// Moves to the next question after a correct answer.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::InvalidTransition`] unless a correct answer is
    /// pending and the game is still in progress.
    #[instrument(skip(self), fields(position = self.position))]
    pub fn advance(&mut self) -> Result<(), LadderError> {
        if self.is_ended() {
            warn!("Advance after game end");
            return Err(LadderError::invalid("the game has ended"));
        }
        if !self.awaiting_advance {
            warn!("Advance without a pending correct answer");
            return Err(LadderError::invalid("no correct answer is pending"));
        }

        self.awaiting_advance = false;
        self.feedback = None;
        self.move_to_next_question();
        info!(position = self.position, "Advanced to next question");
        Ok(())
    }

    /// Ends the game, keeping the banked prize.
    ///
    /// Returns the amount banked.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::InvalidTransition`] on the first question, after
    /// the game ended, or while an advance is pending.
    #[instrument(skip(self), fields(position = self.position))]
    pub fn stop(&mut self) -> Result<u64, LadderError> {
        self.ensure_accepting("stop")?;
        if self.position == 0 {
            warn!("Stop on the first question");
            return Err(LadderError::invalid(
                "cannot stop before the first question is behind you",
            ));
        }
        let question = self.current_question()?.clone();

        self.feedback = Some(AnswerFeedback::stopped(question));
        self.status = GameStatus::Ended(TerminationReason::Stopped);
        info!(accumulated = self.accumulated, "Player stopped");
        Ok(self.accumulated)
    }

    /// Skips the current regular-tier question without changing the bank.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::SkipNotAllowed`] on the million question,
    /// [`LadderError::NoSkipsLeft`] once skips are spent, and
    /// [`LadderError::InvalidTransition`] if the game is not accepting commands.
    #[instrument(skip(self), fields(position = self.position, skips = self.skips_remaining))]
    pub fn skip(&mut self) -> Result<(), LadderError> {
        self.ensure_accepting("skip")?;
        if self.is_million_question() {
            warn!("Skip on the million question");
            return Err(LadderError::SkipNotAllowed);
        }
        if self.skips_remaining == 0 {
            warn!("Skip with none left");
            return Err(LadderError::NoSkipsLeft);
        }

        self.skips_remaining -= 1;
        self.move_to_next_question();
        info!(
            position = self.position,
            skips_remaining = self.skips_remaining,
            "Question skipped"
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Lifeline plumbing (used by LifelineEngine)
    // ─────────────────────────────────────────────────────────────

    /// Validates that `lifeline` may be used now, without consuming it.
    pub(crate) fn check_lifeline(&self, lifeline: Lifeline) -> Result<(), LadderError> {
        self.ensure_accepting("use a lifeline")?;
        if self.is_million_question() {
            return Err(LadderError::LifelineDisabled(lifeline));
        }
        if self.is_lifeline_used(lifeline) {
            return Err(LadderError::AlreadyUsed(lifeline));
        }
        Ok(())
    }

    pub(crate) fn consume_lifeline(&mut self, lifeline: Lifeline, hint: Hint) {
        if let Hint::Cards { eliminated, .. } = &hint {
            self.eliminated.extend(eliminated.iter().copied());
        }
        self.lifelines_used.insert(lifeline);
        self.hints.push(hint);
        debug!(?lifeline, "Lifeline consumed");
    }

    // ─────────────────────────────────────────────────────────────
    //  Helpers
    // ─────────────────────────────────────────────────────────────

    fn ensure_accepting(&self, command: &str) -> Result<(), LadderError> {
        if self.is_ended() {
            return Err(LadderError::invalid(format!(
                "cannot {command}: the game has ended"
            )));
        }
        if self.awaiting_advance {
            return Err(LadderError::invalid(format!(
                "cannot {command}: advance to the next question first"
            )));
        }
        Ok(())
    }

    fn move_to_next_question(&mut self) {
        self.position += 1;
        self.eliminated.clear();
        self.hints.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::ladder::types::QuestionOptions;

    fn questions() -> Vec<Question> {
        (0..TOTAL_QUESTIONS)
            .map(|i| {
                Question::new(
                    format!("Question {i}"),
                    QuestionOptions::new(
                        "a".to_string(),
                        "b".to_string(),
                        "c".to_string(),
                        "d".to_string(),
                    ),
                    OptionLabel::B,
                )
            })
            .collect()
    }

    #[test]
    fn test_fresh_session_defaults() {
        let session = GameSession::from_questions(questions()).unwrap();
        assert_eq!(session.position(), 0);
        assert_eq!(session.accumulated(), 0);
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.skips_remaining(), STARTING_SKIPS);
        assert!(session.eliminated().is_empty());
        assert!(session.termination_reason().is_none());
    }

    #[test]
    fn test_wrong_sequence_length_rejected() {
        let mut qs = questions();
        qs.pop();
        assert!(matches!(
            GameSession::from_questions(qs),
            Err(LadderError::InsufficientQuestions { available: 10, .. })
        ));
    }

    #[test]
    fn test_answer_requires_advance_before_next_answer() {
        let mut session = GameSession::from_questions(questions()).unwrap();
        session.answer(OptionLabel::B).unwrap();
        let before = session.clone();
        assert!(matches!(
            session.answer(OptionLabel::B),
            Err(LadderError::InvalidTransition { .. })
        ));
        assert_eq!(session, before);
    }

    #[test]
    fn test_advance_without_pending_answer_fails() {
        let mut session = GameSession::from_questions(questions()).unwrap();
        assert!(matches!(
            session.advance(),
            Err(LadderError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_stop_records_feedback_without_selection() {
        let mut session = GameSession::from_questions(questions()).unwrap();
        session.skip().unwrap();
        session.stop().unwrap();
        let feedback = session.feedback().unwrap();
        assert!(feedback.selected().is_none());
        assert_eq!(feedback.question().prompt(), "Question 1");
    }
}
