//! Commands issued by a presentation layer, and their results.
//!
//! Commands are plain values: a click on a cell or a jump to a history
//! step. They are validated by [`GameState`](crate::GameState) before any
//! mutation happens, and a rejected command never changes state.

use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// A user intent forwarded by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Click on the cell with this index (0-8).
    Place(usize),
    /// Jump to this history step.
    JumpTo(usize),
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Place(index) => write!(f, "place at cell {}", index),
            Command::JumpTo(step) => write!(f, "jump to step {}", step),
        }
    }
}

/// Whether an accepted command changed the game state.
///
/// Presentation layers use this to skip redundant redraws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// History or step pointer changed.
    Changed,
    /// Command was accepted but left state as it was.
    Unchanged,
}

impl Effect {
    /// Returns true if state changed.
    pub fn is_changed(self) -> bool {
        matches!(self, Effect::Changed)
    }
}

/// Reason a move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Cell index is not on the board.
    #[display("Cell {} is off the board (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The current snapshot already has a winner.
    #[display("Game is already won by {}", _0)]
    GameOver(Player),

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

/// Reason a history jump was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum JumpError {
    /// Step is past the end of history.
    #[display("Step {} is out of range (history has {} entries)", step, len)]
    OutOfRange {
        /// Requested step.
        step: usize,
        /// History length at the time of the request.
        len: usize,
    },

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for JumpError {}

/// Either kind of rejection, as returned by [`GameState::dispatch`](crate::GameState::dispatch).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum CommandError {
    /// The move was rejected.
    #[display("{}", _0)]
    Move(MoveError),
    /// The jump was rejected.
    #[display("{}", _0)]
    Jump(JumpError),
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::Move(e) => Some(e),
            CommandError::Jump(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MoveError::SquareOccupied(Position::Center).to_string(),
            "Square Center is already occupied"
        );
        assert_eq!(
            JumpError::OutOfRange { step: 7, len: 3 }.to_string(),
            "Step 7 is out of range (history has 3 entries)"
        );
        let wrapped: CommandError = MoveError::GameOver(Player::O).into();
        assert_eq!(wrapped.to_string(), "Game is already won by O");
    }

    #[test]
    fn test_command_display() {
        assert_eq!(Command::Place(4).to_string(), "place at cell 4");
        assert_eq!(Command::JumpTo(0).to_string(), "jump to step 0");
    }
}
