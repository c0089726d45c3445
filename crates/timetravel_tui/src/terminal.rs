//! Terminal setup and teardown.

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout, Write};
use tracing::{debug, info, instrument, warn};

/// Owns the terminal in raw mode. Restores it on drop.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    /// Enters raw mode, the alternate screen, and mouse capture.
    ///
    /// Any step that fails undoes the ones before it.
    #[instrument]
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        or_restore(
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture),
            || {
                let _ = disable_raw_mode();
            },
        )
        .context("Failed to enter alternate screen")?;
        let terminal = or_restore(Terminal::new(CrosstermBackend::new(stdout)), || {
            leave(&mut io::stdout())
        })
        .context("Failed to create terminal")?;
        info!("Terminal initialized");
        Ok(Self { terminal })
    }

    /// The wrapped terminal.
    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

/// Runs `restore` when `result` is an error, then passes `result` through.
fn or_restore<T, E>(result: Result<T, E>, restore: impl FnOnce()) -> Result<T, E> {
    if result.is_err() {
        restore();
    }
    result
}

/// Leaves raw mode, the alternate screen, and mouse capture.
fn leave(out: &mut impl Write) {
    if let Err(e) = disable_raw_mode() {
        warn!(error = %e, "Failed to disable raw mode");
    }
    if let Err(e) = execute!(out, LeaveAlternateScreen, DisableMouseCapture) {
        warn!(error = %e, "Failed to leave alternate screen");
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        debug!("Restoring terminal");
        leave(self.terminal.backend_mut());
        if let Err(e) = self.terminal.show_cursor() {
            warn!(error = %e, "Failed to show cursor");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_step_runs_restore() {
        let mut restored = false;
        let failed: Result<(), io::Error> = Err(io::Error::other("no tty"));
        let result = or_restore(failed, || restored = true);
        assert!(result.is_err());
        assert!(restored);
    }

    #[test]
    fn test_successful_step_skips_restore() {
        let mut restored = false;
        let result: Result<u8, io::Error> = or_restore(Ok(7), || restored = true);
        assert_eq!(result.unwrap(), 7);
        assert!(!restored);
    }
}
