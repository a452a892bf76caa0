//! Members sidebar
//!
//! Displays the presence list of the active room.

use palaver_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, List, ListItem},
};

/// Render the members sidebar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" Users ({}) ", app.presence().len());

    let items: Vec<ListItem> = app
        .presence()
        .iter()
        .map(|user| ListItem::new(Line::from(user.name.as_str())))
        .collect();

    let block = Block::default().borders(Borders::ALL).title(title);
    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}
