//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! drawing into the frame.

mod chat;
mod input;
mod login;
mod rooms;
mod status;
mod users;

use palaver_app::{App, Screen};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::input::InputState;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App, input: &InputState) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let area = frame.area();

    if app.screen() == Screen::Login {
        login::render(frame, input, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    let [main_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_main_area(frame, app, *main_area);
    input::render(frame, input, *input_area);
    status::render(frame, app, *status_area);
}

/// Render the main area (rooms sidebar + chat + members sidebar).
fn render_main_area(frame: &mut Frame, app: &App, area: Rect) {
    const ROOM_SIDEBAR_WIDTH: u16 = 16;
    const USER_SIDEBAR_WIDTH: u16 = 16;
    const CHAT_AREA_MIN_WIDTH: u16 = 20;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(ROOM_SIDEBAR_WIDTH),
            Constraint::Min(CHAT_AREA_MIN_WIDTH),
            Constraint::Length(USER_SIDEBAR_WIDTH),
        ])
        .split(area);

    let [rooms_area, chat_area, users_area] = chunks.as_ref() else {
        return;
    };

    rooms::render(frame, app, *rooms_area);
    chat::render(frame, app, *chat_area);
    users::render(frame, app, *users_area);
}
