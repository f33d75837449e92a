//! Application state and logic.

use rand::Rng;
use tracing::debug;

use crate::games::ladder::{
    FeedbackOutcome, GameCommand, GameController, GameView, Hint, TerminationReason,
};

use super::input::Action;

/// Main application state.
pub struct App<R> {
    controller: GameController<R>,
    view: GameView,
    status_message: String,
    should_quit: bool,
}

impl<R: Rng> App<R> {
    /// Creates an application around a started controller.
    pub fn new(controller: GameController<R>) -> Self {
        let view = controller.view();
        Self {
            controller,
            view,
            status_message: "Pick an answer with a-d.".to_string(),
            should_quit: false,
        }
    }

    /// Latest game snapshot.
    pub fn view(&self) -> &GameView {
        &self.view
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Returns true once the player asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Applies a player action.
    pub fn handle_action(&mut self, action: Action) {
        debug!(?action, "Handling action");
        match action {
            Action::Quit => self.should_quit = true,
            Action::Command(command) => match self.controller.execute(command) {
                Ok(view) => {
                    self.status_message = describe(command, &view);
                    self.view = view;
                }
                Err(e) => self.status_message = e.to_string(),
            },
        }
    }
}

fn describe(command: GameCommand, view: &GameView) -> String {
    if let Some(reason) = view.termination_reason {
        let verdict = match reason {
            TerminationReason::WonMax => "You won the million!",
            TerminationReason::Lost => "Wrong answer. Game over.",
            TerminationReason::Stopped => "You stopped.",
        };
        return format!(
            "{verdict} Final prize: {}. Press r to play again or q to quit.",
            format_prize(view.accumulated)
        );
    }

    match command {
        GameCommand::Start => "New game. Pick an answer with a-d.".to_string(),
        GameCommand::Answer { .. } => match view.feedback.as_ref().map(|f| *f.outcome()) {
            Some(FeedbackOutcome::Correct) => format!(
                "Correct! You banked {}. Press Enter to continue.",
                format_prize(view.accumulated)
            ),
            _ => String::new(),
        },
        GameCommand::Advance => format!(
            "Question {} for {}.",
            view.question_number,
            format_prize(view.prize_at_stake)
        ),
        GameCommand::Skip => format!("Question skipped. {} skips left.", view.skips_remaining),
        GameCommand::UseAudience | GameCommand::UseElimination | GameCommand::UseAi => view
            .hints
            .last()
            .map(describe_hint)
            .unwrap_or_default(),
        GameCommand::Stop => String::new(),
    }
}

/// One-line description of a lifeline result.
pub fn describe_hint(hint: &Hint) -> String {
    match hint {
        Hint::Audience { suggestion } => format!("The audience suggests option {suggestion}."),
        Hint::Ai { suggestion } => format!("The virtual assistant points to option {suggestion}."),
        Hint::Cards { card, eliminated } if eliminated.is_empty() => {
            format!("You drew the {card}. No options removed.")
        }
        Hint::Cards { card, eliminated } => {
            let removed: Vec<String> = eliminated.iter().map(|l| l.to_string()).collect();
            format!("You drew the {card}. Removed: {}.", removed.join(", "))
        }
    }
}

/// Formats a prize with thousands separators, e.g. `R$ 1,000,000`.
pub fn format_prize(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("R$ {out}")
}
