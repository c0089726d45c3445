//! Settled winner invariant: nothing follows a winning snapshot.

use super::Invariant;
use crate::GameState;
use crate::rules::check_winner;

/// Invariant: only the last snapshot in history may show a winner.
///
/// Moves are refused on a won board, and a new move after a jump truncates
/// everything past the current step, so a win always ends its branch.
pub struct SettledWinnerInvariant;

impl Invariant<GameState> for SettledWinnerInvariant {
    fn holds(game: &GameState) -> bool {
        let history = game.history();
        let settled = history.len().saturating_sub(1);
        history[..settled]
            .iter()
            .all(|board| check_winner(board).is_none())
    }

    fn description() -> &'static str {
        "Only the last snapshot may show a winner"
    }
}
