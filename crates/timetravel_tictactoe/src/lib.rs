//! Tic-tac-toe with time travel.
//!
//! Every move appends an immutable board snapshot to a history list, and a
//! step pointer selects which snapshot is shown. Jumping to an earlier step
//! and playing a different move discards the snapshots that followed.
//!
//! # Architecture
//!
//! - **Rules**: pure winner detection over one snapshot
//! - **State**: the history, the step pointer, and the two mutating commands
//! - **View**: the read model a presentation layer renders from
//! - **Session**: a [`Presenter`] seam that redraws only on change
//! - **Contracts/Invariants**: pre and postconditions checked around commands
//!
//! # Example
//!
//! ```
//! use timetravel_tictactoe::{GameState, Player};
//!
//! let mut game = GameState::new();
//! for cell in [0, 4, 1, 5, 2] {
//!     game.apply_move(cell).unwrap();
//! }
//! assert_eq!(game.winner(), Some(Player::X));
//!
//! // Further clicks are refused; history still has six snapshots.
//! assert!(game.apply_move(3).is_err());
//! assert_eq!(game.history().len(), 6);
//!
//! game.jump_to(0).unwrap();
//! assert_eq!(game.next_player(), Player::X);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod contracts;
pub mod invariants;
mod position;
pub mod rules;
mod session;
mod state;
mod types;
mod view;

pub use action::{Command, CommandError, Effect, JumpError, MoveError};
pub use position::Position;
pub use rules::check_winner;
pub use session::{Presenter, Session};
pub use state::GameState;
pub use types::{Board, Player, Square};
pub use view::{GameView, MoveEntry, Status, move_label};
