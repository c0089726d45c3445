//! Command-line interface for timetravel.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use timetravel_tictactoe::Position;

/// Timetravel - tic-tac-toe with a rewindable move history
#[derive(Parser, Debug)]
#[command(name = "timetravel")]
#[command(about = "Tic-tac-toe with time travel", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "timetravel.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play,

    /// Apply clicks headlessly and print the resulting board
    Replay {
        /// Cells to click, as indices 0-8 or labels like "center"
        #[arg(value_parser = parse_cell)]
        moves: Vec<usize>,

        /// History step to jump to after the clicks
        #[arg(short, long)]
        jump: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Print every frame that changed, not only the last one
        #[arg(long)]
        frames: bool,
    },
}

/// How `replay` prints frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Board, status line, and move list as plain text
    Text,
    /// The read model as pretty-printed JSON
    Json,
}

/// Parses a cell as a number or a position label.
///
/// Numbers are passed through unchecked so an off-board click is ignored
/// by the game, exactly as in the interactive board.
fn parse_cell(s: &str) -> Result<usize, String> {
    if let Ok(index) = s.trim().parse::<usize>() {
        return Ok(index);
    }
    Position::from_label(s)
        .map(Position::to_index)
        .ok_or_else(|| format!("'{}' is neither a cell index nor a position label", s))
}
