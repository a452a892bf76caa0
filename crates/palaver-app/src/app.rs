//! Application view model.
//!
//! [`App`] is the render sink of the client: it consumes the typed
//! [`RenderCommand`] effects the state machine produces and holds exactly
//! the state a frontend needs to paint. It performs no I/O and makes no
//! decisions; all protocol logic lives in [`palaver_client::Client`].

use palaver_client::{ConnectionState, DisplayMessage, RenderCommand};
use palaver_proto::{RoomName, ServerStats, User};

/// Which view is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    /// Name prompt, shown until the first successful handshake.
    #[default]
    Login,
    /// The chat view.
    Chat,
}

/// View model of the chat client.
#[derive(Debug, Clone, Default)]
pub struct App {
    screen: Screen,
    status: ConnectionState,
    status_note: Option<String>,
    display_name: String,
    active_room: Option<RoomName>,
    rooms: Vec<RoomName>,
    messages: Vec<DisplayMessage>,
    presence: Vec<User>,
    stats: Option<ServerStats>,
}

impl App {
    /// Fresh view model showing the login screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one render effect.
    pub fn apply(&mut self, command: RenderCommand) {
        match command {
            RenderCommand::ShowChatView { display_name } => {
                self.display_name = display_name;
                self.screen = Screen::Chat;
            },
            RenderCommand::SetStatus { state, note } => {
                self.status = state;
                self.status_note = note;
            },
            RenderCommand::SetActiveRoom(room) => self.active_room = Some(room),
            RenderCommand::ClearMessages => self.messages.clear(),
            RenderCommand::AppendMessage(message) => self.messages.push(message),
            RenderCommand::SetRoomList(rooms) => self.rooms = rooms,
            RenderCommand::SetPresence(users) => self.presence = users,
            RenderCommand::SetStats(stats) => self.stats = Some(stats),
        }
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Connection status for the indicator.
    pub fn status(&self) -> ConnectionState {
        self.status
    }

    /// Failure detail of the last error close, if any.
    pub fn status_note(&self) -> Option<&str> {
        self.status_note.as_deref()
    }

    /// Display name as accepted by the server.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Room currently shown as active.
    pub fn active_room(&self) -> Option<&RoomName> {
        self.active_room.as_ref()
    }

    /// Rooms to list in the sidebar.
    pub fn rooms(&self) -> &[RoomName] {
        &self.rooms
    }

    /// The render buffer.
    pub fn messages(&self) -> &[DisplayMessage] {
        &self.messages
    }

    /// Members of the active room.
    pub fn presence(&self) -> &[User] {
        &self.presence
    }

    /// Latest aggregate counters, if a poll has succeeded yet.
    pub fn stats(&self) -> Option<ServerStats> {
        self.stats
    }

    /// The known room after the active one in display order, wrapping
    /// around. Returns `None` when no other room is known.
    pub fn next_room(&self) -> Option<&RoomName> {
        if self.rooms.is_empty() {
            return None;
        }
        let next_idx = match self.active_room.as_ref() {
            Some(active) => self
                .rooms
                .iter()
                .position(|r| r == active)
                .map_or(0, |idx| (idx + 1) % self.rooms.len()),
            None => 0,
        };
        let next = self.rooms.get(next_idx)?;
        if Some(next) == self.active_room.as_ref() { None } else { Some(next) }
    }
}

#[cfg(test)]
mod tests {
    use palaver_client::MessageKind;

    use super::*;

    fn room(name: &str) -> RoomName {
        RoomName::normalize(name).expect("valid room name")
    }

    #[test]
    fn show_chat_view_switches_screen_and_name() {
        let mut app = App::new();
        assert_eq!(app.screen(), Screen::Login);

        app.apply(RenderCommand::ShowChatView { display_name: "alice".into() });
        assert_eq!(app.screen(), Screen::Chat);
        assert_eq!(app.display_name(), "alice");
    }

    #[test]
    fn clear_then_append_rebuilds_the_buffer() {
        let mut app = App::new();
        app.apply(RenderCommand::AppendMessage(DisplayMessage::system("old")));
        app.apply(RenderCommand::ClearMessages);
        app.apply(RenderCommand::AppendMessage(DisplayMessage::system("new")));

        assert_eq!(app.messages().len(), 1);
        assert_eq!(app.messages()[0].text, "new");
        assert_eq!(app.messages()[0].kind, MessageKind::System);
    }

    #[test]
    fn next_room_cycles_and_wraps() {
        let mut app = App::new();
        app.apply(RenderCommand::SetRoomList(vec![room("dev"), room("general")]));
        app.apply(RenderCommand::SetActiveRoom(room("general")));

        assert_eq!(app.next_room(), Some(&room("dev")));

        app.apply(RenderCommand::SetActiveRoom(room("dev")));
        assert_eq!(app.next_room(), Some(&room("general")));
    }

    #[test]
    fn next_room_is_none_when_alone() {
        let mut app = App::new();
        assert_eq!(app.next_room(), None);

        app.apply(RenderCommand::SetRoomList(vec![room("dev")]));
        app.apply(RenderCommand::SetActiveRoom(room("dev")));
        assert_eq!(app.next_room(), None);
    }
}
