//! Read model pulled by presentation layers after every change.

use super::rules::winning_line;
use super::{Board, GameState, Player, Position};
use derive_getters::Getters;
use serde::Serialize;

/// Status line for the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
pub enum Status {
    /// The current snapshot has a completed line.
    #[display("Winner: {}", _0)]
    Winner(Player),
    /// No winner yet. A full board without a line also lands here.
    #[display("Next player: {}", _0)]
    NextPlayer(Player),
}

/// One row of the move list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters, derive_new::new)]
pub struct MoveEntry {
    /// History step this entry jumps to.
    step: usize,
    /// Button text: `Go to game start` or `Go to move #n`.
    label: String,
    /// Square marked by the move that produced this step (none for step 0).
    position: Option<Position>,
    /// Whether this is the step being shown.
    current: bool,
}

/// Everything a presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct GameView {
    /// Snapshot at the current step.
    board: Board,
    /// Status line text source.
    status: Status,
    /// Completed line on the current snapshot, for highlighting.
    winning_line: Option<[Position; 3]>,
    /// Step being shown.
    current_step: usize,
    /// Player who moves next from this step.
    next_player: Player,
    /// One entry per history snapshot.
    moves: Vec<MoveEntry>,
}

impl GameView {
    /// Derives the view from the timeline.
    pub fn from_state(game: &GameState) -> Self {
        let board = *game.current();
        let next_player = game.next_player();
        let status = match game.winner() {
            Some(player) => Status::Winner(player),
            None => Status::NextPlayer(next_player),
        };

        let history = game.history();
        let moves = history
            .iter()
            .enumerate()
            .map(|(step, snapshot)| {
                let position = step
                    .checked_sub(1)
                    .and_then(|prev| history[prev].diff(snapshot));
                MoveEntry::new(
                    step,
                    move_label(step),
                    position,
                    step == game.current_step(),
                )
            })
            .collect();

        Self {
            board,
            status,
            winning_line: winning_line(&board),
            current_step: game.current_step(),
            next_player,
            moves,
        }
    }

    /// Returns true if `pos` is part of the winning line.
    pub fn is_winning(&self, pos: Position) -> bool {
        self.winning_line.is_some_and(|line| line.contains(&pos))
    }
}

/// Move-list label for a history step.
pub fn move_label(step: usize) -> String {
    if step == 0 {
        "Go to game start".to_string()
    } else {
        format!("Go to move #{}", step)
    }
}
