//! Chat area
//!
//! Displays the render buffer of the active room.

use palaver_app::App;
use palaver_client::{DisplayMessage, MessageKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const BORDER_SIZE: u16 = 2;

/// Render the chat area.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = app
        .active_room()
        .map_or_else(|| " No Room ".to_string(), |room| format!(" #{room} "));

    let block = Block::default().borders(Borders::ALL).title(title);

    let items: Vec<ListItem> = if app.active_room().is_none() && app.messages().is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "Join a room to start chatting",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        app.messages().iter().map(|msg| message_line(msg, app.display_name())).collect()
    };

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = items.len().saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    let list = List::new(visible_items).block(block);

    frame.render_widget(list, area);
}

fn message_line<'a>(msg: &'a DisplayMessage, own_name: &str) -> ListItem<'a> {
    let time = msg.ts.map(format_time).unwrap_or_default();

    match msg.kind {
        MessageKind::System => ListItem::new(Line::from(vec![
            Span::styled(time, Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("* {}", msg.text),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            ),
        ])),
        MessageKind::Action => {
            let from = msg.from.as_deref().unwrap_or("?");
            ListItem::new(Line::from(vec![
                Span::styled(time, Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("* {from} {}", msg.text),
                    Style::default().fg(Color::Magenta),
                ),
            ]))
        },
        MessageKind::Chat => {
            let from = msg.from.as_deref().unwrap_or("?");
            let author_color = if from == own_name { Color::Cyan } else { Color::Green };
            ListItem::new(Line::from(vec![
                Span::styled(time, Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("<{from}>"),
                    Style::default().fg(author_color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::raw(msg.text.as_str()),
            ]))
        },
    }
}

/// Format a Unix timestamp as local wall-clock time.
fn format_time(ts: u64) -> String {
    let ts = i64::try_from(ts).unwrap_or(0);
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| format!("{} ", dt.with_timezone(&chrono::Local).format("%H:%M:%S")))
        .unwrap_or_default()
}
