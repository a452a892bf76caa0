//! Rooms sidebar
//!
//! Displays the known rooms with the active one highlighted. Selecting
//! another room (Tab) sends a join; the highlight only moves when the
//! server confirms.

use palaver_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const ACTIVE_PREFIX: &str = ">";
const INACTIVE_PREFIX: &str = " ";

/// Render the rooms sidebar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .rooms()
        .iter()
        .map(|room| {
            let active = app.active_room() == Some(room);
            let (prefix, style) = if active {
                (ACTIVE_PREFIX, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                (INACTIVE_PREFIX, Style::default())
            };

            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(format!("#{room}"), style),
            ]))
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(" Rooms ");
    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}
