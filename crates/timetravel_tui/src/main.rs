//! Timetravel - tic-tac-toe with a rewindable move history.
//!
//! Interactive terminal board plus a headless replay mode.

#![warn(missing_docs)]

mod app;
mod cli;
mod config;
mod input;
mod render;
mod terminal;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use cli::{Cli, Command, OutputFormat};
use config::TuiConfig;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use render::TextPresenter;
use terminal::TerminalGuard;
use timetravel_tictactoe::Session;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = TuiConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Play => run_play(&config),
        Command::Replay {
            moves,
            jump,
            format,
            frames,
        } => run_replay(&config, &moves, jump, format, frames),
    }
}

fn env_filter(config: &TuiConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()))
}

/// Run the interactive board.
fn run_play(config: &TuiConfig) -> Result<()> {
    // Log to a file so output does not corrupt the alternate screen
    let log_file = std::fs::File::create(config.log_file()).with_context(|| {
        format!("Failed to create log file {}", config.log_file().display())
    })?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!("Starting timetravel TUI");

    let mut guard = TerminalGuard::enter()?;
    let res = event_loop(&mut guard, config);
    drop(guard);

    if let Err(err) = &res {
        tracing::error!(error = ?err, "Game loop error");
    }
    res
}

/// Blocking event loop. Each event is handled to completion before the next
/// is read, and the screen is redrawn only when something changed.
#[instrument(skip_all)]
fn event_loop(guard: &mut TerminalGuard, config: &TuiConfig) -> Result<()> {
    let mut app = App::new();

    while !app.should_quit() {
        if app.take_dirty() {
            guard
                .terminal_mut()
                .draw(|f| ui::draw(f, &mut app, config))?;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key.code),
            Event::Mouse(mouse) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    app.on_click(mouse.column, mouse.row);
                }
            }
            Event::Resize(..) => app.mark_dirty(),
            _ => {}
        }
    }

    info!(
        steps = app.game().history().len(),
        current = app.game().current_step(),
        "Session ended"
    );
    Ok(())
}

/// Apply clicks headlessly and print the result.
#[instrument(skip(config))]
fn run_replay(
    config: &TuiConfig,
    moves: &[usize],
    jump: Option<usize>,
    format: OutputFormat,
    frames: bool,
) -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .try_init();

    let mut session = Session::start(TextPresenter::new(config, format))?;
    for &cell in moves {
        session.handle(timetravel_tictactoe::Command::Place(cell))?;
    }
    if let Some(step) = jump {
        session.handle(timetravel_tictactoe::Command::JumpTo(step))?;
    }

    let presenter = session.into_presenter();
    if frames {
        println!("{}", presenter.frames().join("\n"));
    } else if let Some(frame) = presenter.last() {
        println!("{}", frame);
    }
    Ok(())
}
