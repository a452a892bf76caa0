//! Input state and key handling for the TUI.
//!
//! This module owns all text input state (buffer, cursor) and handles
//! character-level key events. On Enter the buffer becomes a user intent:
//! a display name on the login screen, a slash command or chat text in the
//! chat view. Unrecognized slash commands are sent as chat text and left
//! for the server to interpret.

use palaver_app::{App, AppInput, Screen};

/// Key input events from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Character input.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Tab key (cycle rooms).
    Tab,
    /// Escape key (quit).
    Esc,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
}

/// Input state for the TUI.
///
/// Manages the text input buffer and cursor position.
#[derive(Debug, Default)]
pub struct InputState {
    buffer: String,
    cursor: usize,
}

impl InputState {
    /// Empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text in the input buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Current cursor position, in bytes.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle a key event, producing intents for the runtime.
    pub fn handle_key(&mut self, key: KeyInput, app: &App) -> Vec<AppInput> {
        match key {
            KeyInput::Char(c) => {
                self.buffer.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                vec![AppInput::Redraw]
            },
            KeyInput::Backspace => {
                if let Some((idx, _)) = self.buffer[..self.cursor].char_indices().next_back() {
                    self.buffer.remove(idx);
                    self.cursor = idx;
                }
                vec![AppInput::Redraw]
            },
            KeyInput::Delete => {
                if self.cursor < self.buffer.len() {
                    self.buffer.remove(self.cursor);
                }
                vec![AppInput::Redraw]
            },
            KeyInput::Left => {
                if let Some((idx, _)) = self.buffer[..self.cursor].char_indices().next_back() {
                    self.cursor = idx;
                }
                vec![AppInput::Redraw]
            },
            KeyInput::Right => {
                if let Some(c) = self.buffer[self.cursor..].chars().next() {
                    self.cursor += c.len_utf8();
                }
                vec![AppInput::Redraw]
            },
            KeyInput::Home => {
                self.cursor = 0;
                vec![AppInput::Redraw]
            },
            KeyInput::End => {
                self.cursor = self.buffer.len();
                vec![AppInput::Redraw]
            },
            KeyInput::Enter => self.handle_enter(app),
            KeyInput::Tab => Self::handle_tab(app),
            KeyInput::Esc => vec![AppInput::Quit],
        }
    }

    /// Handle Enter - turn the buffer into an intent.
    fn handle_enter(&mut self, app: &App) -> Vec<AppInput> {
        let text = std::mem::take(&mut self.buffer);
        self.cursor = 0;

        let text = text.trim();
        if text.is_empty() {
            return vec![];
        }

        if app.screen() == Screen::Login {
            return vec![AppInput::SetName(text.to_string())];
        }

        if let Some(rest) = text.strip_prefix("/join ") {
            return vec![AppInput::JoinRoom(rest.trim().to_string())];
        }
        if text == "/quit" {
            return vec![AppInput::Quit];
        }

        vec![AppInput::SubmitChat(text.to_string())]
    }

    /// Handle Tab - switch to the next known room.
    fn handle_tab(app: &App) -> Vec<AppInput> {
        match app.next_room() {
            Some(room) => vec![AppInput::JoinRoom(room.to_string())],
            None => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use palaver_client::RenderCommand;
    use palaver_proto::RoomName;

    use super::*;

    fn chat_app() -> App {
        let mut app = App::new();
        app.apply(RenderCommand::ShowChatView { display_name: "alice".into() });
        app
    }

    #[test]
    fn typing_and_editing_updates_the_buffer() {
        let mut input = InputState::new();
        let app = chat_app();

        input.handle_key(KeyInput::Char('h'), &app);
        input.handle_key(KeyInput::Char('i'), &app);
        assert_eq!(input.buffer(), "hi");

        input.handle_key(KeyInput::Backspace, &app);
        assert_eq!(input.buffer(), "h");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn cursor_moves_by_whole_characters() {
        let mut input = InputState::new();
        let app = chat_app();

        input.handle_key(KeyInput::Char('é'), &app);
        input.handle_key(KeyInput::Char('x'), &app);
        input.handle_key(KeyInput::Left, &app);
        input.handle_key(KeyInput::Left, &app);
        assert_eq!(input.cursor(), 0);

        input.handle_key(KeyInput::Right, &app);
        assert_eq!(input.cursor(), 'é'.len_utf8());
    }

    #[test]
    fn enter_on_login_submits_the_name() {
        let mut input = InputState::new();
        let app = App::new();

        for c in "alice".chars() {
            input.handle_key(KeyInput::Char(c), &app);
        }
        let intents = input.handle_key(KeyInput::Enter, &app);
        assert_eq!(intents, vec![AppInput::SetName("alice".into())]);
        assert!(input.buffer().is_empty());
    }

    #[test]
    fn enter_in_chat_sends_text_or_commands() {
        let mut input = InputState::new();
        let app = chat_app();

        for c in "hello".chars() {
            input.handle_key(KeyInput::Char(c), &app);
        }
        assert_eq!(
            input.handle_key(KeyInput::Enter, &app),
            vec![AppInput::SubmitChat("hello".into())]
        );

        for c in "/join dev".chars() {
            input.handle_key(KeyInput::Char(c), &app);
        }
        assert_eq!(
            input.handle_key(KeyInput::Enter, &app),
            vec![AppInput::JoinRoom("dev".into())]
        );

        for c in "/quit".chars() {
            input.handle_key(KeyInput::Char(c), &app);
        }
        assert_eq!(input.handle_key(KeyInput::Enter, &app), vec![AppInput::Quit]);
    }

    #[test]
    fn unknown_slash_commands_go_to_the_server() {
        let mut input = InputState::new();
        let app = chat_app();

        for c in "/me waves".chars() {
            input.handle_key(KeyInput::Char(c), &app);
        }
        assert_eq!(
            input.handle_key(KeyInput::Enter, &app),
            vec![AppInput::SubmitChat("/me waves".into())]
        );
    }

    #[test]
    fn tab_cycles_to_the_next_room() {
        let mut input = InputState::new();
        let mut app = chat_app();
        let dev = RoomName::normalize("dev").expect("valid");
        let general = RoomName::normalize("general").expect("valid");
        app.apply(RenderCommand::SetRoomList(vec![dev, general.clone()]));
        app.apply(RenderCommand::SetActiveRoom(general));

        assert_eq!(
            input.handle_key(KeyInput::Tab, &app),
            vec![AppInput::JoinRoom("dev".into())]
        );
    }
}
