//! Errors raised by the ladder state machine.

use super::types::Lifeline;

/// A rejected ladder command.
///
/// Every failure leaves the session exactly as it was before the command.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum LadderError {
    /// The pool cannot supply a full question sequence.
    #[display("Question pool has {available} questions but {required} are required")]
    InsufficientQuestions {
        /// Questions in the pool.
        available: usize,
        /// Questions a game needs.
        required: usize,
    },

    /// A ladder position outside the question sequence was requested.
    #[display("Ladder position {position} is outside the question sequence")]
    OutOfSequence {
        /// Offending position.
        position: usize,
    },

    /// The command is not allowed in the current state.
    #[display("Invalid transition: {reason}")]
    InvalidTransition {
        /// Why the command was refused.
        reason: String,
    },

    /// All skips have been spent.
    #[display("No skips left")]
    NoSkipsLeft,

    /// Skipping the million question is not allowed.
    #[display("The million question cannot be skipped")]
    SkipNotAllowed,

    /// The lifeline was already consumed this game.
    #[display("Lifeline {_0} was already used")]
    AlreadyUsed(Lifeline),

    /// Lifelines are switched off for the million question.
    #[display("Lifeline {_0} is disabled on the million question")]
    LifelineDisabled(Lifeline),
}

impl std::error::Error for LadderError {}

impl LadderError {
    /// Builds an [`LadderError::InvalidTransition`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidTransition {
            reason: reason.into(),
        }
    }

    /// Machine-readable error kind, e.g. `"no_skips_left"`.
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}
