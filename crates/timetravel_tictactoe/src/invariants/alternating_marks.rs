//! Alternating marks invariant: each snapshot adds one mark for the right player.

use super::Invariant;
use crate::{Board, GameState, Player, Square};

/// Invariant: history starts empty and grows one mark per step.
///
/// Snapshot `i + 1` equals snapshot `i` with exactly one previously empty
/// square now held by [`Player::for_step(i)`](Player::for_step). This is what
/// lets the next player be derived from the step pointer alone.
pub struct AlternatingMarksInvariant;

impl Invariant<GameState> for AlternatingMarksInvariant {
    fn holds(game: &GameState) -> bool {
        let history = game.history();
        let starts_empty = history.first() == Some(&Board::new());

        starts_empty
            && history.windows(2).enumerate().all(|(step, pair)| {
                let (before, after) = (&pair[0], &pair[1]);
                before.diff(after).is_some_and(|pos| {
                    before.is_empty(pos)
                        && after.get(pos) == Square::Occupied(Player::for_step(step))
                })
            })
    }

    fn description() -> &'static str {
        "Each snapshot adds exactly one mark for the player on turn"
    }
}
