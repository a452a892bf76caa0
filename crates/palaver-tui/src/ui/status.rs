//! Status bar
//!
//! Displays connection status, the active room, and the aggregate server
//! counters from the stats poller.

use palaver_app::App;
use palaver_client::ConnectionState;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let connection_status = match app.status() {
        ConnectionState::Disconnected => {
            let text = match app.status_note() {
                Some(note) => format!("Disconnected ({note})"),
                None => "Disconnected".to_string(),
            };
            Span::styled(text, Style::default().fg(Color::Red))
        },
        ConnectionState::Connecting => {
            Span::styled("Connecting...", Style::default().fg(Color::Yellow))
        },
        ConnectionState::Connected => Span::styled(
            format!("Connected as {}", app.display_name()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };

    let room_info = app.active_room().map_or_else(String::new, |room| {
        format!(" | Room: #{room} | Members: {}", app.presence().len())
    });

    let stats_info = app.stats().map_or_else(String::new, |stats| {
        format!(" | Online: {} | Rooms: {}", stats.users_online, stats.rooms_count)
    });

    let status_line = Line::from(vec![
        Span::raw(" "),
        connection_status,
        Span::styled(room_info, Style::default().fg(Color::DarkGray)),
        Span::styled(stats_info, Style::default().fg(Color::DarkGray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
