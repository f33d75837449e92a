//! Key bindings.

use crossterm::event::KeyCode;

use crate::games::ladder::{GameCommand, OptionLabel};

/// What a keypress asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Send a command to the game.
    Command(GameCommand),
    /// Leave the client.
    Quit,
}

/// Maps a key to an action.
pub fn action_for_key(key: KeyCode) -> Option<Action> {
    let command = match key {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Enter => GameCommand::Advance,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            's' => GameCommand::Stop,
            'p' => GameCommand::Skip,
            'u' => GameCommand::UseAudience,
            'e' => GameCommand::UseElimination,
            'i' => GameCommand::UseAi,
            'r' => GameCommand::Start,
            other => GameCommand::Answer {
                option: OptionLabel::from_char(other)?,
            },
        },
        _ => return None,
    };
    Some(Action::Command(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_keys_answer() {
        assert_eq!(
            action_for_key(KeyCode::Char('b')),
            Some(Action::Command(GameCommand::Answer {
                option: OptionLabel::B
            }))
        );
        assert_eq!(
            action_for_key(KeyCode::Char('D')),
            Some(Action::Command(GameCommand::Answer {
                option: OptionLabel::D
            }))
        );
    }

    #[test]
    fn test_lifeline_keys_do_not_shadow_answers() {
        assert_eq!(
            action_for_key(KeyCode::Char('e')),
            Some(Action::Command(GameCommand::UseElimination))
        );
        assert_eq!(
            action_for_key(KeyCode::Char('c')),
            Some(Action::Command(GameCommand::Answer {
                option: OptionLabel::C
            }))
        );
    }

    #[test]
    fn test_unbound_keys_ignored() {
        assert_eq!(action_for_key(KeyCode::Char('z')), None);
        assert_eq!(action_for_key(KeyCode::Tab), None);
        assert_eq!(action_for_key(KeyCode::Esc), Some(Action::Quit));
    }
}
