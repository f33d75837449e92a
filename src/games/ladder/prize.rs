//! Prize ladder arithmetic.
//!
//! Pure functions mapping ladder positions to prize amounts, plus the
//! stop and forfeit rules.

use super::error::LadderError;
use super::session::GameSession;

/// Number of questions in a game (10 regular tiers + the million).
pub const TOTAL_QUESTIONS: usize = 11;

/// Number of regular-tier questions.
pub const REGULAR_QUESTIONS: usize = 10;

/// Position of the million question.
pub const MILLION_POSITION: usize = TOTAL_QUESTIONS - 1;

/// Prize for a correct answer at each position.
pub const LADDER: [u64; TOTAL_QUESTIONS] = [
    1_000, 2_000, 3_000, 4_000, 5_000, 10_000, 20_000, 30_000, 40_000, 50_000, 1_000_000,
];

/// The fixed prize ladder shared by every game.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrizeLadder;

impl PrizeLadder {
    /// Prize won by a correct answer at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::OutOfSequence`] if `position` is past the million question.
    pub fn prize_at(position: usize) -> Result<u64, LadderError> {
        LADDER
            .get(position)
            .copied()
            .ok_or(LadderError::OutOfSequence { position })
    }

    /// What stopping banks right now.
    pub fn safe_prize(session: &GameSession) -> u64 {
        session.accumulated()
    }

    /// What the player keeps after a wrong answer at `position`.
    ///
    /// Nothing on the first question or the million question, half the
    /// banked amount anywhere else.
    pub fn forfeit_prize(session: &GameSession, position: usize) -> u64 {
        forfeit_amount(session.accumulated(), position)
    }

    /// Returns true if `position` is the million question.
    pub fn is_million(position: usize) -> bool {
        position == MILLION_POSITION
    }

    /// All tiers, lowest first.
    pub fn tiers() -> &'static [u64; TOTAL_QUESTIONS] {
        &LADDER
    }
}

pub(crate) fn forfeit_amount(accumulated: u64, position: usize) -> u64 {
    if position == 0 || position == MILLION_POSITION {
        0
    } else {
        accumulated / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_strictly_increasing() {
        assert!(LADDER.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(LADDER[MILLION_POSITION], 1_000_000);
    }

    #[test]
    fn test_prize_at_bounds() {
        assert_eq!(PrizeLadder::prize_at(0), Ok(1_000));
        assert_eq!(PrizeLadder::prize_at(9), Ok(50_000));
        assert_eq!(PrizeLadder::prize_at(10), Ok(1_000_000));
        assert_eq!(
            PrizeLadder::prize_at(11),
            Err(LadderError::OutOfSequence { position: 11 })
        );
    }

    #[test]
    fn test_forfeit_halves_mid_ladder() {
        for position in 1..MILLION_POSITION {
            let banked = LADDER[position - 1];
            assert_eq!(forfeit_amount(banked, position), banked / 2);
        }
    }

    #[test]
    fn test_forfeit_zero_at_edges() {
        assert_eq!(forfeit_amount(0, 0), 0);
        assert_eq!(forfeit_amount(50_000, MILLION_POSITION), 0);
    }
}
