//! Contract-based validation for timeline commands.
//!
//! Contracts define correctness through preconditions and postconditions,
//! in the Hoare style `{P} action {Q}`. Preconditions always run; the
//! state machine checks postconditions in debug builds only.

use super::action::{JumpError, MoveError};
use super::invariants::{InvariantSet, TimelineInvariants, describe};
use super::rules::check_winner;
use super::{GameState, Position};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Rejection type reported by this contract.
    type Error;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), Self::Error>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Self::Error>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: The current snapshot must not already have a winner.
pub struct NoWinnerYet;

impl NoWinnerYet {
    /// Rejects with [`MoveError::GameOver`] when the current board is won.
    #[instrument(skip(game))]
    pub fn check(game: &GameState) -> Result<(), MoveError> {
        match check_winner(game.current()) {
            Some(winner) => Err(MoveError::GameOver(winner)),
            None => Ok(()),
        }
    }
}

/// Precondition: The square at the move's position must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Rejects with [`MoveError::SquareOccupied`] when the square is taken.
    #[instrument(skip(game))]
    pub fn check(pos: Position, game: &GameState) -> Result<(), MoveError> {
        if game.current().is_empty(pos) {
            Ok(())
        } else {
            Err(MoveError::SquareOccupied(pos))
        }
    }
}

/// Composite precondition: no winner yet, then an empty square.
///
/// The winner check comes first, so clicking an occupied square on a won
/// board reports [`MoveError::GameOver`].
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(pos: Position, game: &GameState) -> Result<(), MoveError> {
        NoWinnerYet::check(game)?;
        SquareIsEmpty::check(pos, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for placing a mark.
///
/// Postconditions:
/// - The step pointer advanced by exactly one and points at the last snapshot
/// - Snapshots up to the old step are untouched
/// - All timeline invariants hold
pub struct MoveContract;

impl Contract<GameState, Position> for MoveContract {
    type Error = MoveError;

    fn pre(game: &GameState, pos: &Position) -> Result<(), MoveError> {
        LegalMove::check(*pos, game)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), MoveError> {
        let kept = before.current_step() + 1;
        if after.current_step() != kept || after.history().len() != kept + 1 {
            warn!(
                before_step = before.current_step(),
                after_step = after.current_step(),
                after_len = after.history().len(),
                "Move did not land one step past the old current step"
            );
            return Err(MoveError::InvariantViolation(
                "Move must append exactly one snapshot after the current step".to_string(),
            ));
        }
        if after.history()[..kept] != before.history()[..kept] {
            return Err(MoveError::InvariantViolation(
                "Move rewrote snapshots before the current step".to_string(),
            ));
        }
        TimelineInvariants::check_all(after).map_err(|violations| {
            MoveError::InvariantViolation(format!("Postcondition failed: {}", describe(&violations)))
        })
    }
}

// ─────────────────────────────────────────────────────────────
//  Jump Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for jumping to a history step.
///
/// Postconditions:
/// - History content and length are unchanged
/// - All timeline invariants hold
pub struct JumpContract;

impl Contract<GameState, usize> for JumpContract {
    type Error = JumpError;

    fn pre(game: &GameState, step: &usize) -> Result<(), JumpError> {
        let len = game.history().len();
        if *step < len {
            Ok(())
        } else {
            Err(JumpError::OutOfRange { step: *step, len })
        }
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), JumpError> {
        if before.history() != after.history() {
            return Err(JumpError::InvariantViolation(
                "Jump must not touch history".to_string(),
            ));
        }
        TimelineInvariants::check_all(after).map_err(|violations| {
            JumpError::InvariantViolation(format!("Postcondition failed: {}", describe(&violations)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Player};

    #[test]
    fn test_precondition_empty_square() {
        let game = GameState::new();
        assert!(MoveContract::pre(&game, &Position::Center).is_ok());
    }

    #[test]
    fn test_precondition_occupied_square() {
        let mut game = GameState::new();
        game.apply_move(4).unwrap();
        assert_eq!(
            MoveContract::pre(&game, &Position::Center),
            Err(MoveError::SquareOccupied(Position::Center))
        );
    }

    #[test]
    fn test_precondition_game_over_reported_before_occupied() {
        let mut game = GameState::new();
        for index in [0, 4, 1, 5, 2] {
            game.apply_move(index).unwrap();
        }
        assert_eq!(
            MoveContract::pre(&game, &Position::TopLeft),
            Err(MoveError::GameOver(Player::X))
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = GameState::new();
        let mut after = before.clone();
        after.apply_move(4).unwrap();
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_rewritten_prefix() {
        let mut before = GameState::new();
        before.apply_move(4).unwrap();
        let mut after = before.clone();
        after.apply_move(0).unwrap();
        after.history[1] = Board::new().with_mark(Position::TopRight, Player::X);
        assert!(matches!(
            MoveContract::post(&before, &after),
            Err(MoveError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_postcondition_detects_missing_append() {
        let before = GameState::new();
        let after = before.clone();
        assert!(MoveContract::post(&before, &after).is_err());
    }

    #[test]
    fn test_jump_precondition_bounds() {
        let mut game = GameState::new();
        game.apply_move(0).unwrap();
        assert!(JumpContract::pre(&game, &1).is_ok());
        assert_eq!(
            JumpContract::pre(&game, &2),
            Err(JumpError::OutOfRange { step: 2, len: 2 })
        );
    }

    #[test]
    fn test_jump_postcondition_detects_history_change() {
        let before = GameState::new();
        let mut after = before.clone();
        after.apply_move(0).unwrap();
        assert!(JumpContract::post(&before, &after).is_err());
    }
}
