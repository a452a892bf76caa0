//! Login screen
//!
//! Name prompt shown until the server confirms a session.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::input::InputState;

/// Render the login screen.
pub fn render(frame: &mut Frame, input: &InputState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Fill(2),
        ])
        .split(area);

    let [_, hint_area, prompt_area, _] = chunks.as_ref() else {
        return;
    };

    let hint = Paragraph::new(Line::from("Pick a display name and press Enter"))
        .style(Style::default().fg(Color::DarkGray))
        .centered();
    frame.render_widget(hint, *hint_area);

    let prompt_area = centered_prompt(*prompt_area);
    let block = Block::default().borders(Borders::ALL).title(" Name ");
    let paragraph = Paragraph::new(input.buffer()).block(block);
    frame.render_widget(paragraph, prompt_area);

    let cursor_col = input.buffer()[..input.cursor()].chars().count() as u16;
    frame.set_cursor_position(Position::new(prompt_area.x + 1 + cursor_col, prompt_area.y + 1));
}

/// Narrow the prompt to a centered column.
fn centered_prompt(area: Rect) -> Rect {
    const PROMPT_WIDTH: u16 = 32;

    let width = area.width.min(PROMPT_WIDTH);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    Rect::new(x, area.y, width, area.height)
}
