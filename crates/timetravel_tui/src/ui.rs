//! Stateless UI rendering for the board and move list.

use crate::app::{App, Focus, Hitmap};
use crate::config::TuiConfig;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use timetravel_tictactoe::{GameView, Player, Position, Square, Status};

const CELL_WIDTH: u16 = 7;
const CELL_HEIGHT: u16 = 3;
const BOARD_WIDTH: u16 = CELL_WIDTH * 3 + 2;
const BOARD_HEIGHT: u16 = CELL_HEIGHT * 3 + 2;
const MOVES_WIDTH: u16 = 38;

/// Renders one frame and records clickable regions on `app`.
pub fn draw(frame: &mut Frame, app: &mut App, config: &TuiConfig) {
    let view = app.game().view();
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(BOARD_HEIGHT),
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Tic-Tac-Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(BOARD_WIDTH), Constraint::Length(MOVES_WIDTH)])
        .split(chunks[1]);

    let cells = draw_board(frame, body[0], app, &view, config);
    let (moves, moves_offset) = draw_moves(frame, body[1], app, &view);

    let status_style = match view.status() {
        Status::Winner(_) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Status::NextPlayer(_) => Style::default().fg(Color::Yellow),
    };
    let status = Paragraph::new(status_text(&view, config))
        .style(status_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new("arrows/1-9 move · enter play · tab history · [ ] step · q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);

    app.set_hitmap(Hitmap {
        cells,
        moves,
        moves_offset,
    });
}

/// Status line using the configured player glyphs.
pub fn status_text(view: &GameView, config: &TuiConfig) -> String {
    match view.status() {
        Status::Winner(player) => format!("Winner: {}", config.label(*player)),
        Status::NextPlayer(player) => format!("Next player: {}", config.label(*player)),
    }
}

fn draw_board(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    view: &GameView,
    config: &TuiConfig,
) -> [Rect; 9] {
    let board_area = center_rect(area, BOARD_WIDTH, BOARD_HEIGHT);
    let line = Style::default().fg(Color::DarkGray);
    let mut cells = [Rect::default(); 9];

    for pos in Position::ALL {
        let x = board_area.x + pos.col() as u16 * (CELL_WIDTH + 1);
        let y = board_area.y + pos.row() as u16 * (CELL_HEIGHT + 1);
        let cell = Rect::new(x, y, CELL_WIDTH, CELL_HEIGHT).intersection(area);
        cells[pos.to_index()] = cell;
        draw_cell(frame, cell, app, view, config, pos);
    }

    for row in 1..3u16 {
        let y = board_area.y + row * (CELL_HEIGHT + 1) - 1;
        let sep = Rect::new(board_area.x, y, BOARD_WIDTH, 1).intersection(area);
        frame.render_widget(Paragraph::new("─".repeat(BOARD_WIDTH as usize)).style(line), sep);
    }
    for col in 1..3u16 {
        let x = board_area.x + col * (CELL_WIDTH + 1) - 1;
        for row in 0..3u16 {
            let y = board_area.y + row * (CELL_HEIGHT + 1);
            let sep = Rect::new(x, y, 1, CELL_HEIGHT).intersection(area);
            let bar = vec![Line::from("│"); CELL_HEIGHT as usize];
            frame.render_widget(Paragraph::new(bar).style(line), sep);
        }
    }

    cells
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    view: &GameView,
    config: &TuiConfig,
    pos: Position,
) {
    let (symbol, mut style) = match view.board().get(pos) {
        Square::Empty if *config.show_coordinates() => (
            (pos.to_index() + 1).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Empty => (String::new(), Style::default()),
        Square::Occupied(player) => (
            config.label(player).to_string(),
            player_style(player).add_modifier(Modifier::BOLD),
        ),
    };

    if view.is_winning(pos) {
        style = style.bg(Color::Green).fg(Color::Black);
    }
    if app.focus() == Focus::Board && pos == app.cursor() {
        style = style.bg(Color::White).fg(Color::Black);
    }

    let padding = area.height.saturating_sub(1) / 2;
    let mut lines = vec![Line::from(""); padding as usize];
    lines.push(Line::from(Span::styled(symbol, style)));
    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(style.bg.unwrap_or(Color::Reset)))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn player_style(player: Player) -> Style {
    match player {
        Player::X => Style::default().fg(Color::Blue),
        Player::O => Style::default().fg(Color::Red),
    }
}

/// Draws the move list and returns its inner area and scroll offset.
fn draw_moves(frame: &mut Frame, area: Rect, app: &App, view: &GameView) -> (Rect, usize) {
    let focused = app.focus() == Focus::Moves;
    let block = Block::default()
        .title("History")
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = usize::from(inner.height).max(1);
    let offset = app.selected().saturating_sub(visible - 1);

    let lines: Vec<Line> = view
        .moves()
        .iter()
        .skip(offset)
        .take(visible)
        .map(|entry| {
            let marker = if *entry.current() { "▶ " } else { "  " };
            let mut text = format!("{}{}", marker, entry.label());
            if let Some(pos) = entry.position() {
                text.push_str(&format!(" ({})", pos.label()));
            }
            let mut style = Style::default();
            if *entry.current() {
                style = style.add_modifier(Modifier::BOLD);
            }
            if focused && *entry.step() == app.selected() {
                style = style.bg(Color::White).fg(Color::Black);
            }
            Line::from(Span::styled(text, style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
    (inner, offset)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
