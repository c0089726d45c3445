//! The game timeline: snapshot history plus a step pointer.

use super::action::{Command, CommandError, Effect, JumpError, MoveError};
use super::contracts::{Contract, JumpContract, MoveContract};
use super::rules::check_winner;
use super::view::GameView;
use super::{Board, Player, Position};
use tracing::{debug, instrument};

/// Single source of truth for game progress.
///
/// Holds every board snapshot reached on the current branch and the index
/// of the one being shown. Whose turn it is follows from the step pointer
/// and is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) history: Vec<Board>,
    pub(crate) current_step: usize,
}

impl GameState {
    /// Creates a new game with a single empty snapshot.
    #[instrument]
    pub fn new() -> Self {
        Self {
            history: vec![Board::new()],
            current_step: 0,
        }
    }

    /// Every snapshot on the current branch, oldest first.
    pub fn history(&self) -> &[Board] {
        &self.history
    }

    /// Index of the snapshot being shown.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// The snapshot at the current step.
    pub fn current(&self) -> &Board {
        &self.history[self.current_step]
    }

    /// Player who moves next from the current step.
    pub fn next_player(&self) -> Player {
        Player::for_step(self.current_step)
    }

    /// Winner shown on the current snapshot, if any.
    pub fn winner(&self) -> Option<Player> {
        check_winner(self.current())
    }

    /// Builds the read model for rendering.
    pub fn view(&self) -> GameView {
        GameView::from_state(self)
    }

    /// Clicks the cell with the given index (0-8).
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfBounds`] for an index past 8, otherwise
    /// whatever [`place`](Self::place) rejects with. State is unchanged on
    /// every error.
    #[instrument(skip(self), fields(step = self.current_step))]
    pub fn apply_move(&mut self, index: usize) -> Result<Effect, MoveError> {
        let pos = Position::from_index(index).ok_or(MoveError::OutOfBounds(index))?;
        self.place(pos)
    }

    /// Marks `pos` for the next player on top of the current snapshot.
    ///
    /// Snapshots past the current step are discarded first, so playing
    /// after a jump back starts a new branch.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the current snapshot already has a winner.
    /// - [`MoveError::SquareOccupied`] if the square is taken.
    #[instrument(skip(self), fields(step = self.current_step, player = ?self.next_player()))]
    pub fn place(&mut self, pos: Position) -> Result<Effect, MoveError> {
        MoveContract::pre(self, &pos)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let player = self.next_player();
        let next = self.current().with_mark(pos, player);
        let discarded = self.history.len() - (self.current_step + 1);
        self.history.truncate(self.current_step + 1);
        self.history.push(next);
        self.current_step = self.history.len() - 1;

        #[cfg(debug_assertions)]
        if let Err(e) = MoveContract::post(&before, self) {
            *self = before;
            return Err(e);
        }

        debug!(
            position = %pos,
            player = %player,
            discarded,
            step = self.current_step,
            "Move applied"
        );
        Ok(Effect::Changed)
    }

    /// Moves the step pointer to `step` without touching history.
    ///
    /// # Errors
    ///
    /// Returns [`JumpError::OutOfRange`] if `step` is not an index into
    /// history. State is unchanged on error.
    #[instrument(skip(self), fields(from = self.current_step, len = self.history.len()))]
    pub fn jump_to(&mut self, step: usize) -> Result<Effect, JumpError> {
        JumpContract::pre(self, &step)?;

        if step == self.current_step {
            return Ok(Effect::Unchanged);
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.current_step = step;

        #[cfg(debug_assertions)]
        if let Err(e) = JumpContract::post(&before, self) {
            *self = before;
            return Err(e);
        }

        debug!(step, "Jumped");
        Ok(Effect::Changed)
    }

    /// Routes a presentation command to the matching operation.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, command: Command) -> Result<Effect, CommandError> {
        match command {
            Command::Place(index) => Ok(self.apply_move(index)?),
            Command::JumpTo(step) => Ok(self.jump_to(step)?),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
