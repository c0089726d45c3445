//! Step pointer invariant: the current step always indexes into history.

use super::Invariant;
use crate::GameState;

/// Invariant: `current_step < history.len()`.
///
/// Implies history is never empty.
pub struct StepInBoundsInvariant;

impl Invariant<GameState> for StepInBoundsInvariant {
    fn holds(game: &GameState) -> bool {
        game.current_step() < game.history().len()
    }

    fn description() -> &'static str {
        "Current step indexes into history"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_holds() {
        assert!(StepInBoundsInvariant::holds(&GameState::new()));
    }

    #[test]
    fn test_holds_after_jump_back() {
        let mut game = GameState::new();
        game.apply_move(4).unwrap();
        game.apply_move(0).unwrap();
        game.jump_to(1).unwrap();
        assert!(StepInBoundsInvariant::holds(&game));
    }

    #[test]
    fn test_dangling_step_violates() {
        let mut game = GameState::new();
        game.current_step = 1;
        assert!(!StepInBoundsInvariant::holds(&game));
    }
}
