//! Presentation boundary.
//!
//! A [`Session`] owns the [`GameState`] and a [`Presenter`]. Commands flow
//! in, the state mutates (or refuses), and the presenter pulls a fresh
//! [`GameView`] only when something actually changed.

use super::action::{Command, Effect};
use super::{GameState, GameView};
use tracing::{debug, instrument};

/// Something that can render a [`GameView`].
///
/// Implemented by terminal front ends, text printers, and test recorders.
pub trait Presenter {
    /// Error raised while rendering.
    type Error;

    /// Renders one frame.
    fn present(&mut self, view: &GameView) -> Result<(), Self::Error>;
}

/// Game state wired to a presenter.
#[derive(Debug)]
pub struct Session<P> {
    game: GameState,
    presenter: P,
}

impl<P: Presenter> Session<P> {
    /// Starts a new game and presents the initial frame.
    #[instrument(skip(presenter))]
    pub fn start(presenter: P) -> Result<Self, P::Error> {
        let mut session = Self {
            game: GameState::new(),
            presenter,
        };
        session.refresh()?;
        Ok(session)
    }

    /// Applies a command, re-presenting only on change.
    ///
    /// Rejected commands are logged and treated as no-ops, which is what a
    /// click on an occupied square should look like to the user.
    #[instrument(skip(self))]
    pub fn handle(&mut self, command: Command) -> Result<Effect, P::Error> {
        let effect = match self.game.dispatch(command) {
            Ok(effect) => effect,
            Err(e) => {
                debug!(error = %e, "Command ignored");
                Effect::Unchanged
            }
        };
        if effect.is_changed() {
            self.refresh()?;
        }
        Ok(effect)
    }

    /// Presents the current view unconditionally.
    pub fn refresh(&mut self) -> Result<(), P::Error> {
        let view = self.game.view();
        self.presenter.present(&view)
    }

    /// The underlying game state.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// The presenter.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The presenter, mutably.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Consumes the session, returning the presenter.
    pub fn into_presenter(self) -> P {
        self.presenter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Status;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<GameView>,
    }

    impl Presenter for Recorder {
        type Error = std::convert::Infallible;

        fn present(&mut self, view: &GameView) -> Result<(), Self::Error> {
            self.frames.push(view.clone());
            Ok(())
        }
    }

    #[test]
    fn test_start_presents_initial_frame() {
        let session = Session::start(Recorder::default()).unwrap();
        assert_eq!(session.presenter().frames.len(), 1);
        assert_eq!(*session.presenter().frames[0].current_step(), 0);
    }

    #[test]
    fn test_only_changes_are_presented() {
        let mut session = Session::start(Recorder::default()).unwrap();

        assert_eq!(session.handle(Command::Place(4)).unwrap(), Effect::Changed);
        assert_eq!(session.handle(Command::Place(4)).unwrap(), Effect::Unchanged);
        assert_eq!(session.handle(Command::Place(42)).unwrap(), Effect::Unchanged);
        assert_eq!(session.handle(Command::JumpTo(1)).unwrap(), Effect::Unchanged);
        assert_eq!(session.handle(Command::JumpTo(9)).unwrap(), Effect::Unchanged);
        assert_eq!(session.handle(Command::JumpTo(0)).unwrap(), Effect::Changed);

        let frames = session.into_presenter().frames;
        assert_eq!(frames.len(), 3);
        assert_eq!(*frames[2].status(), Status::NextPlayer(crate::Player::X));
    }

    #[test]
    fn test_presenter_errors_propagate() {
        struct Broken;
        impl Presenter for Broken {
            type Error = &'static str;
            fn present(&mut self, _view: &GameView) -> Result<(), Self::Error> {
                Err("terminal gone")
            }
        }

        assert_eq!(Session::start(Broken).err(), Some("terminal gone"));
    }

    #[test]
    fn test_game_tracks_handled_commands() {
        let mut session = Session::start(Recorder::default()).unwrap();
        session.handle(Command::Place(0)).unwrap();
        session.handle(Command::Place(8)).unwrap();
        session.handle(Command::JumpTo(1)).unwrap();

        assert_eq!(session.game().current_step(), 1);
        assert_eq!(session.game().history().len(), 3);

        session.presenter_mut().frames.clear();
        session.refresh().unwrap();
        assert_eq!(session.presenter().frames.len(), 1);
    }
}
