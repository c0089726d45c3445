//! Application state and event handling.
//!
//! Terminal events become [`Command`]s handled by a [`Session`]; everything
//! else here (cursor, focus, list selection) is view-only state.

use crate::input::{digit_cell, move_cursor, move_selection};
use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use std::convert::Infallible;
use timetravel_tictactoe::{Command, Effect, GameState, GameView, Position, Presenter, Session};
use tracing::{info, instrument};

/// Which pane receives arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Arrow keys move the board cursor.
    #[default]
    Board,
    /// Arrow keys move the move-list selection.
    Moves,
}

impl Focus {
    /// Switches to the other pane.
    pub fn toggle(self) -> Self {
        match self {
            Self::Board => Self::Moves,
            Self::Moves => Self::Board,
        }
    }
}

/// Screen regions from the last draw, used to resolve mouse clicks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hitmap {
    /// Area of each board cell, indexed by cell.
    pub cells: [Rect; 9],
    /// Inner area of the move list.
    pub moves: Rect,
    /// First move-list step visible in `moves`.
    pub moves_offset: usize,
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Presenter for the interactive board.
///
/// Only flags that a redraw is due. The event loop draws the frame itself
/// from the game state.
#[derive(Debug, Default)]
pub struct Redraw {
    pending: bool,
}

impl Redraw {
    fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl Presenter for Redraw {
    type Error = Infallible;

    fn present(&mut self, _view: &GameView) -> Result<(), Self::Error> {
        self.pending = true;
        Ok(())
    }
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    session: Session<Redraw>,
    cursor: Position,
    focus: Focus,
    selected: usize,
    hitmap: Hitmap,
    dirty: bool,
    should_quit: bool,
}

impl App {
    /// Creates a new application with a fresh game.
    #[instrument]
    pub fn new() -> Self {
        let Ok(session) = Session::start(Redraw::default());
        Self {
            session,
            cursor: Position::Center,
            focus: Focus::default(),
            selected: 0,
            hitmap: Hitmap::default(),
            dirty: false,
            should_quit: false,
        }
    }

    /// The game being shown.
    pub fn game(&self) -> &GameState {
        self.session.game()
    }

    /// Board cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Pane with keyboard focus.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Selected move-list row.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Screen regions from the last draw.
    #[cfg(test)]
    pub fn hitmap(&self) -> &Hitmap {
        &self.hitmap
    }

    /// Records screen regions from a draw.
    pub fn set_hitmap(&mut self, hitmap: Hitmap) {
        self.hitmap = hitmap;
    }

    /// Forces a redraw on the next loop iteration.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a redraw is due, clearing the flag.
    ///
    /// A redraw is due after a game change presented by the session or a
    /// change to view-only state.
    pub fn take_dirty(&mut self) -> bool {
        let view_changed = std::mem::take(&mut self.dirty);
        self.session.presenter_mut().take() || view_changed
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn on_key(&mut self, key: KeyCode) {
        if let Some(command) = self.command_for_key(key) {
            self.apply(command);
        }
    }

    /// Handles a left click at a terminal cell.
    #[instrument(skip(self))]
    pub fn on_click(&mut self, column: u16, row: u16) {
        if let Some(command) = self.command_for_click(column, row) {
            self.apply(command);
        }
    }

    /// Updates view-only state for `key` and returns the game command it
    /// stands for, if any.
    fn command_for_key(&mut self, key: KeyCode) -> Option<Command> {
        if let Some(cell) = digit_cell(key) {
            self.cursor = Position::from_index(cell).unwrap_or(self.cursor);
            self.dirty = true;
            return Some(Command::Place(cell));
        }

        let step = self.game().current_step();
        match (key, self.focus) {
            (KeyCode::Char('q') | KeyCode::Esc, _) => {
                info!("User quit");
                self.should_quit = true;
                None
            }
            (KeyCode::Tab | KeyCode::BackTab, _) => {
                self.focus = self.focus.toggle();
                self.selected = step;
                self.dirty = true;
                None
            }
            (KeyCode::Char('['), _) => Some(Command::JumpTo(step.saturating_sub(1))),
            (KeyCode::Char(']'), _) => Some(Command::JumpTo(step + 1)),
            (KeyCode::Enter | KeyCode::Char(' '), Focus::Board) => {
                Some(Command::Place(self.cursor.to_index()))
            }
            (KeyCode::Enter | KeyCode::Char(' '), Focus::Moves) => {
                Some(Command::JumpTo(self.selected))
            }
            (_, Focus::Board) => {
                let moved = move_cursor(self.cursor, key);
                self.dirty |= moved != self.cursor;
                self.cursor = moved;
                None
            }
            (_, Focus::Moves) => {
                let len = self.game().history().len();
                let moved = move_selection(self.selected, len, key);
                self.dirty |= moved != self.selected;
                self.selected = moved;
                None
            }
        }
    }

    /// Resolves a click against the last drawn layout.
    fn command_for_click(&mut self, column: u16, row: u16) -> Option<Command> {
        if let Some(cell) = self
            .hitmap
            .cells
            .iter()
            .position(|area| contains(*area, column, row))
        {
            self.focus = Focus::Board;
            self.cursor = Position::from_index(cell).unwrap_or(self.cursor);
            self.dirty = true;
            return Some(Command::Place(cell));
        }

        if contains(self.hitmap.moves, column, row) {
            let step = self.hitmap.moves_offset + usize::from(row - self.hitmap.moves.y);
            if step < self.game().history().len() {
                self.focus = Focus::Moves;
                self.selected = step;
                self.dirty = true;
                return Some(Command::JumpTo(step));
            }
        }
        None
    }

    /// Sends a command through the session. Rejections are silent no-ops.
    #[instrument(skip(self))]
    pub fn apply(&mut self, command: Command) -> Effect {
        let Ok(effect) = self.session.handle(command);
        if effect.is_changed() {
            self.selected = self.game().current_step();
        }
        effect
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timetravel_tictactoe::Player;

    fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            app.on_key(*key);
        }
    }

    #[test]
    fn test_enter_places_at_cursor() {
        let mut app = App::new();
        press(&mut app, &[KeyCode::Up, KeyCode::Left, KeyCode::Enter]);
        assert_eq!(
            app.game().current().get(Position::TopLeft),
            timetravel_tictactoe::Square::Occupied(Player::X)
        );
        assert_eq!(app.game().next_player(), Player::O);
    }

    #[test]
    fn test_digits_place_directly() {
        let mut app = App::new();
        press(&mut app, &[KeyCode::Char('5'), KeyCode::Char('5')]);
        assert_eq!(app.game().history().len(), 2);
        assert_eq!(app.cursor(), Position::Center);
    }

    #[test]
    fn test_redraws_follow_session_presents() {
        let mut app = App::new();
        assert!(app.take_dirty(), "initial frame is due");
        assert!(!app.take_dirty());

        assert_eq!(app.apply(Command::Place(4)), Effect::Changed);
        assert!(app.take_dirty());

        assert_eq!(app.apply(Command::JumpTo(1)), Effect::Unchanged);
        assert_eq!(app.apply(Command::JumpTo(5)), Effect::Unchanged);
        assert!(!app.take_dirty());

        assert_eq!(app.apply(Command::JumpTo(0)), Effect::Changed);
        assert!(app.take_dirty());
        assert_eq!(app.selected(), 0);
    }

    #[test]
    fn test_rejected_click_is_silent() {
        let mut app = App::new();
        app.on_key(KeyCode::Char('1'));
        app.take_dirty();
        assert_eq!(app.apply(Command::Place(0)), Effect::Unchanged);
        assert!(!app.take_dirty());
    }

    #[test]
    fn test_brackets_step_through_history() {
        let mut app = App::new();
        press(
            &mut app,
            &[KeyCode::Char('1'), KeyCode::Char('5'), KeyCode::Char('[')],
        );
        assert_eq!(app.game().current_step(), 1);
        press(&mut app, &[KeyCode::Char(']'), KeyCode::Char(']')]);
        assert_eq!(app.game().current_step(), 2);
        press(&mut app, &[KeyCode::Char('['), KeyCode::Char('['), KeyCode::Char('[')]);
        assert_eq!(app.game().current_step(), 0);
    }

    #[test]
    fn test_move_list_jump_with_keyboard() {
        let mut app = App::new();
        press(&mut app, &[KeyCode::Char('1'), KeyCode::Char('2')]);
        press(&mut app, &[KeyCode::Tab, KeyCode::Up, KeyCode::Up, KeyCode::Enter]);
        assert_eq!(app.focus(), Focus::Moves);
        assert_eq!(app.game().current_step(), 0);
        assert_eq!(app.game().history().len(), 3);
        assert_eq!(app.selected(), 0);
    }

    #[test]
    fn test_mouse_clicks_resolve_through_hitmap() {
        let mut app = App::new();
        let mut cells = [Rect::default(); 9];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = Rect::new((i % 3) as u16 * 4, (i / 3) as u16 * 2, 3, 1);
        }
        app.set_hitmap(Hitmap {
            cells,
            moves: Rect::new(20, 0, 20, 5),
            moves_offset: 0,
        });

        app.on_click(5, 2); // cell 4
        app.on_click(0, 0); // cell 0
        assert_eq!(app.game().history().len(), 3);

        app.on_click(25, 1); // move list row for step 1
        assert_eq!(app.game().current_step(), 1);
        assert_eq!(app.focus(), Focus::Moves);

        app.on_click(25, 4); // past the end of history
        assert_eq!(app.game().current_step(), 1);

        app.on_click(3, 0); // separator between cells
        assert_eq!(app.game().history().len(), 3);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        app.on_key(KeyCode::Char('q'));
        assert!(app.should_quit());

        let mut app = App::new();
        app.on_key(KeyCode::Esc);
        assert!(app.should_quit());
    }
}
