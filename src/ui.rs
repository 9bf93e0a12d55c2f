//! Terminal rendering. Reads the app state, never mutates it.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::game::GameState;
use crate::pieces::{Cell, Matrix, PieceKind, EMPTY};

// ============================================================================
// Visual Constants
// ============================================================================

const CELL_WIDTH: u16 = 2;
const BLOCK_CHAR: &str = "██";
const EMPTY_CHAR: &str = "  ";
const GRID_CHAR: &str = " ·";
const PREVIEW_SIZE: usize = 6;
const PREVIEW_INSET: usize = 1;
const SIDE_WIDTH: u16 = 16;

// ============================================================================
// Color Mapping
// ============================================================================

pub fn piece_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::Rgb(0x00, 0xf0, 0xf0),
        PieceKind::J => Color::Rgb(0x00, 0x00, 0xf0),
        PieceKind::L => Color::Rgb(0xf0, 0xa0, 0x00),
        PieceKind::O => Color::Rgb(0xf0, 0xf0, 0x00),
        PieceKind::S => Color::Rgb(0x00, 0xf0, 0x00),
        PieceKind::T => Color::Rgb(0xa0, 0x00, 0xf0),
        PieceKind::Z => Color::Rgb(0xf0, 0x00, 0x00),
    }
}

fn cell_span(cell: Cell, show_grid: bool) -> Span<'static> {
    match PieceKind::from_code(cell) {
        Some(kind) => Span::styled(BLOCK_CHAR, Style::default().fg(piece_color(kind))),
        None if show_grid => Span::styled(GRID_CHAR, Style::default().fg(Color::DarkGray)),
        None => Span::raw(EMPTY_CHAR),
    }
}

// ============================================================================
// Rendering
// ============================================================================

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.size();

    let board_width = app.game.board.width() as u16 * CELL_WIDTH + 2;
    let board_height = app.game.board.height() as u16 + 2;
    let main_area = centered_rect(board_width + SIDE_WIDTH, board_height, area);

    let columns = Layout::horizontal([
        Constraint::Length(board_width),
        Constraint::Length(SIDE_WIDTH),
    ])
    .split(main_area);

    render_board(frame, app, columns[0]);

    let side = Layout::vertical([
        Constraint::Length(PREVIEW_SIZE as u16 + 2),
        Constraint::Fill(1),
    ])
    .split(columns[1]);

    render_next(frame, app, side[0]);
    render_info(frame, app, side[1]);

    match app.game.state {
        GameState::Paused | GameState::GameOver => {
            render_banner(frame, app.status_message(), columns[0])
        }
        GameState::Idle | GameState::Running => {}
    }
}

fn render_board(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Tetris ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = app
        .game
        .render_grid()
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|cell| cell_span(cell, app.show_grid))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_next(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Next ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = preview_lines(app.game.player.next.as_ref(), app.show_grid);
    frame.render_widget(Paragraph::new(lines), inner);
}

/// The queued piece drawn one cell in from the corner of a fixed 6x6
/// preview.
fn preview_lines(next: Option<&Matrix>, show_grid: bool) -> Vec<Line<'static>> {
    (0..PREVIEW_SIZE)
        .map(|y| {
            let spans: Vec<Span> = (0..PREVIEW_SIZE)
                .map(|x| {
                    let cell = next
                        .zip(y.checked_sub(PREVIEW_INSET))
                        .and_then(|(matrix, y)| matrix.rows().get(y))
                        .zip(x.checked_sub(PREVIEW_INSET))
                        .and_then(|(row, x)| row.get(x))
                        .copied()
                        .unwrap_or(EMPTY);
                    cell_span(cell, show_grid)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn render_info(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Info ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let help = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(Span::styled("Score", Style::default().fg(Color::Yellow))),
        Line::from(app.score_label().to_string()),
        Line::from(""),
        Line::from(format!("[P] {}", app.start_label())),
        Line::from(Span::styled(
            app.status_message(),
            Style::default().fg(Color::Red),
        )),
        Line::from(""),
        Line::from(Span::styled("←→  move", help)),
        Line::from(Span::styled("↑   rotate", help)),
        Line::from(Span::styled("↓   drop", help)),
        Line::from(Span::styled("SPC hard drop", help)),
        Line::from(Span::styled("G   grid", help)),
        Line::from(Span::styled("Q   quit", help)),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_banner(frame: &mut Frame, message: &str, area: Rect) {
    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(message.to_string())])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(paragraph, centered_rect(16, 5, area));
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .split(area);

    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .split(horizontal[1]);

    vertical[1]
}
