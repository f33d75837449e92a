//! View-safe snapshot of a game for presentation layers.

use serde::{Deserialize, Serialize};

use super::prize::TOTAL_QUESTIONS;
use super::session::GameSession;
use super::types::{AnswerFeedback, Hint, Lifeline, OptionLabel, TerminationReason};

/// An answer option that is still visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleOption {
    /// Option label.
    pub label: OptionLabel,
    /// Option text.
    pub text: String,
}

/// The active question with eliminated options filtered out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    /// Question text.
    pub prompt: String,
    /// Options still in play.
    pub options: Vec<VisibleOption>,
}

/// Which commands are currently available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifelineAvailability {
    /// Skip can be used.
    pub skip: bool,
    /// Audience can be asked.
    pub audience: bool,
    /// A card can be drawn.
    pub cards: bool,
    /// The AI assistant can be asked.
    pub ai: bool,
}

/// Everything a presentation layer needs to render the game.
///
/// The correct option of the active question is never included; it only
/// appears in [`feedback`](Self::feedback) once the question is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// 0-based ladder position.
    pub position: usize,
    /// 1-based question number for display.
    pub question_number: usize,
    /// Questions in a full game.
    pub total_questions: usize,
    /// The current question is the million question.
    pub is_million_question: bool,
    /// Prize for answering the current question correctly.
    pub prize_at_stake: u64,
    /// Prize banked so far.
    pub accumulated: u64,
    /// What stopping would bank, `None` while stopping is not allowed.
    pub stop_prize: Option<u64>,
    /// What a wrong answer would leave.
    pub forfeit_if_wrong: u64,
    /// The game is over.
    pub ended: bool,
    /// Why the game ended.
    pub termination_reason: Option<TerminationReason>,
    /// A correct answer is waiting for `advance`.
    pub awaiting_advance: bool,
    /// The question to answer, `None` while reviewing or after the end.
    pub question: Option<QuestionView>,
    /// Lifeline availability flags.
    pub lifelines: LifelineAvailability,
    /// Skips left.
    pub skips_remaining: u8,
    /// Lifeline results for the current question.
    pub hints: Vec<Hint>,
    /// Review of the last resolved question.
    pub feedback: Option<AnswerFeedback>,
}

impl GameView {
    /// Builds a snapshot of `session`.
    pub fn from_session(session: &GameSession) -> Self {
        let question = if session.is_ended() || session.is_awaiting_advance() {
            None
        } else {
            session.current_question().ok().map(|q| QuestionView {
                prompt: q.prompt().clone(),
                options: q
                    .options()
                    .iter()
                    .filter(|(label, _)| !session.eliminated().contains(label))
                    .map(|(label, text)| VisibleOption {
                        label,
                        text: text.to_string(),
                    })
                    .collect(),
            })
        };

        Self {
            position: session.position(),
            question_number: session.position() + 1,
            total_questions: TOTAL_QUESTIONS,
            is_million_question: session.is_million_question(),
            prize_at_stake: session.prize_at_stake(),
            accumulated: session.accumulated(),
            stop_prize: session.can_stop().then(|| session.accumulated()),
            forfeit_if_wrong: session.forfeit_if_wrong(),
            ended: session.is_ended(),
            termination_reason: session.termination_reason(),
            awaiting_advance: session.is_awaiting_advance(),
            question,
            lifelines: LifelineAvailability {
                skip: session.can_skip(),
                audience: session.can_use_lifeline(Lifeline::Audience),
                cards: session.can_use_lifeline(Lifeline::Cards),
                ai: session.can_use_lifeline(Lifeline::Ai),
            },
            skips_remaining: session.skips_remaining(),
            hints: session.hints().to_vec(),
            feedback: session.feedback().cloned(),
        }
    }
}
