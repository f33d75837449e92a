//! Prize-ladder trivia: question sequencing, prize rules and lifelines.

mod controller;
mod error;
mod lifelines;
mod pool;
mod prize;
mod session;
mod types;
mod view;

pub use controller::{GameCommand, GameController};
pub use error::LadderError;
pub use lifelines::{Elimination, LifelineEngine};
pub use pool::QuestionPool;
pub use prize::{LADDER, MILLION_POSITION, PrizeLadder, REGULAR_QUESTIONS, TOTAL_QUESTIONS};
pub use session::{GameSession, STARTING_SKIPS};
pub use types::{
    AnswerFeedback, EliminationCard, FeedbackOutcome, GameStatus, Hint, Lifeline, OptionLabel,
    Question, QuestionOptions, TerminationReason,
};
pub use view::{GameView, LifelineAvailability, QuestionView, VisibleOption};
