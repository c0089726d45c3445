//! Game rules for tic-tac-toe.
//!
//! Pure functions over a single board snapshot. Rules are kept apart from
//! history storage so contracts and the read model can reuse them.

pub mod win;

pub use win::{LINES, check_winner, winning_line};
