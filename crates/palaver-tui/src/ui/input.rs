//! Input line
//!
//! Renders the text entry box with the cursor at its edit position.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    widgets::{Block, Borders, Paragraph},
};

use crate::input::InputState;

/// Render the input line.
pub fn render(frame: &mut Frame, input: &InputState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Message (/join <room>, /quit) ");
    let paragraph = Paragraph::new(input.buffer()).block(block);
    frame.render_widget(paragraph, area);

    let cursor_col = input.buffer()[..input.cursor()].chars().count() as u16;
    frame.set_cursor_position(Position::new(area.x + 1 + cursor_col, area.y + 1));
}
