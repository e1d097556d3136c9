//! Stateless UI rendering for the 1024 board.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strictly_1024_engine::{Outcome, Snapshot, Tile};

/// Width of one rendered cell, including padding.
const CELL_WIDTH: u16 = 7;

/// Key help shown under the board.
pub const HELP: &str = "arrows/WASD move · u undo · r reset · [ ] size · q quit";

/// Renders the board, score line and status message.
pub fn draw(frame: &mut Frame, snapshot: &Snapshot, status: &str) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(6),    // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new(format!(
        "Strictly 1024 - {}x{} - reach {}",
        snapshot.side_length(),
        snapshot.side_length(),
        snapshot.win_tile()
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], snapshot);

    let status_text = Paragraph::new(status_line(snapshot, status))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_text, chunks[2]);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

/// Text for the status box: a pending message wins over the outcome.
pub fn status_line(snapshot: &Snapshot, message: &str) -> String {
    if !message.is_empty() {
        return message.to_string();
    }
    let progress = format!("Score {}  Move {}", snapshot.score(), snapshot.move_number());
    match snapshot.outcome() {
        Some(Outcome::Win) => format!("{}  You made it to {}!", progress, snapshot.win_tile()),
        Some(Outcome::Loss) => format!("{}  No more available moves.", progress),
        None => progress,
    }
}

fn draw_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let side = u16::from(*snapshot.side_length());
    let board_area = center_rect(area, side * CELL_WIDTH + 2, side + 2);

    let lines: Vec<Line> = snapshot
        .rows()
        .map(|row| Line::from(row.iter().map(|tile| cell(*tile)).collect::<Vec<_>>()))
        .collect();

    let board = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(board, board_area);
}

fn cell(tile: Tile) -> Span<'static> {
    if tile == 0 {
        return Span::styled(
            format!("{:>width$}", '.', width = usize::from(CELL_WIDTH)),
            Style::default().fg(Color::DarkGray),
        );
    }
    Span::styled(
        format!("{:>width$}", tile, width = usize::from(CELL_WIDTH)),
        tile_style(tile),
    )
}

fn tile_style(tile: Tile) -> Style {
    let color = match tile.trailing_zeros() {
        1 => Color::White,
        2 => Color::LightYellow,
        3 => Color::Yellow,
        4 => Color::LightRed,
        5 => Color::Red,
        6 => Color::LightMagenta,
        7 => Color::Magenta,
        8 => Color::LightBlue,
        9 => Color::Blue,
        10 => Color::LightGreen,
        _ => Color::Green,
    };
    let style = Style::default().fg(color);
    if tile >= 1024 {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
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
