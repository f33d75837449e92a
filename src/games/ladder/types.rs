//! Core domain types for the prize ladder.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator};

/// Label of one of the four answer options.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    strum::Display,
)]
#[strum(ascii_case_insensitive)]
pub enum OptionLabel {
    /// Option A.
    #[serde(alias = "a")]
    A,
    /// Option B.
    #[serde(alias = "b")]
    B,
    /// Option C.
    #[serde(alias = "c")]
    C,
    /// Option D.
    #[serde(alias = "d")]
    D,
}

impl OptionLabel {
    /// Maps a keypress (`a`-`d`, either case) to a label.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            _ => None,
        }
    }

    /// All four labels in display order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

/// The four answer texts of a question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct QuestionOptions {
    #[serde(rename = "A", alias = "a")]
    a: String,
    #[serde(rename = "B", alias = "b")]
    b: String,
    #[serde(rename = "C", alias = "c")]
    c: String,
    #[serde(rename = "D", alias = "d")]
    d: String,
}

impl QuestionOptions {
    /// Returns the text of the option with the given label.
    pub fn get(&self, label: OptionLabel) -> &str {
        match label {
            OptionLabel::A => &self.a,
            OptionLabel::B => &self.b,
            OptionLabel::C => &self.c,
            OptionLabel::D => &self.d,
        }
    }

    /// Iterates `(label, text)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionLabel, &str)> {
        OptionLabel::all().map(move |label| (label, self.get(label)))
    }
}

/// A trivia question as drawn from the pool. Immutable once drawn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
pub struct Question {
    /// Question text.
    prompt: String,
    /// The four answer options.
    options: QuestionOptions,
    /// Label of the correct option.
    #[serde(alias = "correct_option", alias = "answer")]
    correct: OptionLabel,
}

impl Question {
    /// Returns true if `label` is the correct option.
    pub fn is_correct(&self, label: OptionLabel) -> bool {
        self.correct == label
    }

    /// Labels of the three incorrect options.
    pub fn incorrect_options(&self) -> impl Iterator<Item = OptionLabel> + '_ {
        OptionLabel::all().filter(move |label| *label != self.correct)
    }
}

/// Why a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Answered the million question correctly.
    WonMax,
    /// Answered a question incorrectly.
    Lost,
    /// Stopped and banked the guaranteed prize.
    Stopped,
}

/// Lifecycle status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game is over. Terminal.
    Ended(TerminationReason),
}

/// One-shot hint lifelines. Skips are counted separately.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Lifeline {
    /// The studio audience names an option.
    Audience,
    /// Draw a card that eliminates wrong options.
    Cards,
    /// The virtual assistant names an option.
    Ai,
}

/// Card drawn by the elimination lifeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum EliminationCard {
    /// Removes one wrong option.
    Ace,
    /// Removes two wrong options.
    Two,
    /// Removes three wrong options.
    Three,
    /// Removes nothing.
    King,
}

impl EliminationCard {
    /// The deck, each card equally likely.
    pub const DECK: [EliminationCard; 4] = [Self::Ace, Self::Two, Self::Three, Self::King];

    /// Number of wrong options this card asks to remove.
    pub fn eliminates(self) -> usize {
        match self {
            Self::Ace => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::King => 0,
        }
    }
}

/// Information released by a lifeline for the current question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "lifeline", rename_all = "snake_case")]
pub enum Hint {
    /// Audience suggestion.
    Audience {
        /// Suggested option.
        suggestion: OptionLabel,
    },
    /// Virtual assistant suggestion.
    Ai {
        /// Suggested option.
        suggestion: OptionLabel,
    },
    /// Elimination card result.
    Cards {
        /// Card that was drawn.
        card: EliminationCard,
        /// Options removed by the draw.
        eliminated: Vec<OptionLabel>,
    },
}

/// How a reviewed question was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackOutcome {
    /// The player picked the correct option.
    Correct,
    /// The player picked a wrong option.
    Wrong,
    /// The player stopped on this question.
    Stopped,
}

/// Snapshot of a resolved question kept for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct AnswerFeedback {
    /// The question as it was shown.
    question: Question,
    /// Player's selection, `None` when the player stopped.
    selected: Option<OptionLabel>,
    /// Resolution of the question.
    outcome: FeedbackOutcome,
}

impl AnswerFeedback {
    pub(crate) fn answered(question: Question, selected: OptionLabel) -> Self {
        let outcome = if question.is_correct(selected) {
            FeedbackOutcome::Correct
        } else {
            FeedbackOutcome::Wrong
        };
        Self {
            question,
            selected: Some(selected),
            outcome,
        }
    }

    pub(crate) fn stopped(question: Question) -> Self {
        Self {
            question,
            selected: None,
            outcome: FeedbackOutcome::Stopped,
        }
    }

    /// Returns true if the player answered correctly.
    pub fn is_correct(&self) -> bool {
        self.outcome == FeedbackOutcome::Correct
    }
}
