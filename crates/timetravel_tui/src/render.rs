//! Plain-text and JSON frames for headless replays.

use crate::cli::OutputFormat;
use crate::config::TuiConfig;
use timetravel_tictactoe::{GameView, Presenter, Square};

/// Collects one rendered frame per presented view.
#[derive(Debug)]
pub struct TextPresenter<'a> {
    config: &'a TuiConfig,
    format: OutputFormat,
    frames: Vec<String>,
}

impl<'a> TextPresenter<'a> {
    /// Creates a presenter that renders in `format`.
    pub fn new(config: &'a TuiConfig, format: OutputFormat) -> Self {
        Self {
            config,
            format,
            frames: Vec::new(),
        }
    }

    /// Every frame rendered so far.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// The most recent frame.
    pub fn last(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }
}

impl Presenter for TextPresenter<'_> {
    type Error = serde_json::Error;

    fn present(&mut self, view: &GameView) -> Result<(), Self::Error> {
        let frame = match self.format {
            OutputFormat::Text => render_text(view, self.config),
            OutputFormat::Json => serde_json::to_string_pretty(view)?,
        };
        self.frames.push(frame);
        Ok(())
    }
}

/// Renders the board, status line, and move list as text.
pub fn render_text(view: &GameView, config: &TuiConfig) -> String {
    let mut out = String::new();

    for (idx, square) in view.board().squares().iter().enumerate() {
        let symbol = match square {
            Square::Occupied(player) => config.label(*player).to_string(),
            Square::Empty if *config.show_coordinates() => (idx + 1).to_string(),
            Square::Empty => " ".to_string(),
        };
        out.push_str(&format!(" {} ", symbol));
        match idx % 3 {
            2 if idx < 8 => out.push_str("\n---+---+---\n"),
            2 => out.push('\n'),
            _ => out.push('|'),
        }
    }

    out.push('\n');
    out.push_str(&crate::ui::status_text(view, config));
    out.push('\n');

    for entry in view.moves() {
        let marker = if *entry.current() { '>' } else { ' ' };
        out.push_str(&format!("{} {}. {}", marker, entry.step(), entry.label()));
        if let Some(pos) = entry.position() {
            out.push_str(&format!(" ({})", pos.label()));
        }
        out.push('\n');
    }

    out
}
