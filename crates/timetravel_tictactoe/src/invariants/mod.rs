//! First-class invariants for the game timeline.
//!
//! Invariants are logical properties that must hold after every command.
//! They are testable independently and are checked by the contracts in
//! debug builds.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples so sets compose without boxing.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or every violation found.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        collect(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        collect(violations)
    }
}

pub mod alternating_marks;
pub mod settled_winner;
pub mod step_in_bounds;

pub use alternating_marks::AlternatingMarksInvariant;
pub use settled_winner::SettledWinnerInvariant;
pub use step_in_bounds::StepInBoundsInvariant;

/// All timeline invariants as a composable set.
pub type TimelineInvariants = (
    StepInBoundsInvariant,
    AlternatingMarksInvariant,
    SettledWinnerInvariant,
);

/// Joins violation descriptions into one message.
pub(crate) fn describe(violations: &[InvariantViolation]) -> String {
    violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, GameState, Player, Position};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        let game = GameState::new();
        assert!(TimelineInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_branching() {
        let mut game = GameState::new();
        for index in [0, 4, 1] {
            game.apply_move(index).unwrap();
        }
        game.jump_to(1).unwrap();
        game.apply_move(8).unwrap();
        assert!(TimelineInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut game = GameState::new();
        game.history
            .push(Board::new().with_mark(Position::Center, Player::O));
        game.current_step = 5;

        let violations = TimelineInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations.len(), 2);
        assert!(describe(&violations).contains("; "));
    }

    #[test]
    fn test_two_invariants_as_set() {
        let game = GameState::new();
        type TwoInvariants = (StepInBoundsInvariant, SettledWinnerInvariant);
        assert!(TwoInvariants::check_all(&game).is_ok());
    }
}
