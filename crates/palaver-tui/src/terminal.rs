//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. The network side wires the
//! WebSocket transport from [`palaver_client::transport`].

use std::{
    io::{self, Stdout, stdout},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use palaver_app::{App, AppInput, Driver};
use palaver_client::{
    ClientEnvelope, CloseReason, ConnectParams, TransportEvent,
    transport::{self, ConnectedClient, TransportError},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::sync::mpsc::error::TryRecvError;

use crate::{input::InputState, ui};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel send error.
    #[error("channel send error")]
    ChannelSend,
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), and network
/// communication (tokio-tungstenite). Owns the input state for text
/// editing.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    events: EventStream,
    connection: Option<ConnectedClient>,
    endpoint: String,
    input: InputState,
}

impl TerminalDriver {
    /// Create a new terminal driver for the given chat endpoint.
    pub fn new(endpoint: String) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            events: EventStream::new(),
            connection: None,
            endpoint,
            input: InputState::new(),
        })
    }

    /// Convert a crossterm key code to a [`crate::KeyInput`].
    fn convert_key(code: KeyCode) -> Option<crate::KeyInput> {
        use crate::KeyInput;
        match code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Tab => Some(KeyInput::Tab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self, app: &App) -> Result<Vec<AppInput>, TerminalError> {
        let timeout = Duration::from_millis(100);

        tokio::select! {
            biased;

            maybe_event = self.events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        match Self::convert_key(key.code) {
                            Some(key) => Ok(self.input.handle_key(key, app)),
                            None => Ok(vec![]),
                        }
                    },
                    Some(Ok(Event::Resize(_, _))) => Ok(vec![AppInput::Redraw]),
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    _ => Ok(vec![]),
                }
            }

            () = tokio::time::sleep(timeout) => Ok(vec![]),
        }
    }

    async fn connect(&mut self, params: &ConnectParams) -> Result<(), TerminalError> {
        let client = transport::connect(&self.endpoint, params).await?;
        self.connection = Some(client);
        Ok(())
    }

    async fn send(&mut self, envelope: ClientEnvelope) -> Result<(), TerminalError> {
        if let Some(conn) = &self.connection {
            conn.to_server.send(envelope).await.map_err(|_| TerminalError::ChannelSend)?;
        }
        Ok(())
    }

    fn poll_transport(&mut self) -> Option<TransportEvent> {
        let conn = self.connection.as_mut()?;
        match conn.from_server.try_recv() {
            Ok(event @ TransportEvent::Closed { .. }) => {
                conn.stop();
                self.connection = None;
                Some(event)
            },
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.connection = None;
                Some(TransportEvent::Closed { reason: CloseReason::Clean })
            },
        }
    }

    fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    fn render(&mut self, app: &App) -> Result<(), TerminalError> {
        self.terminal.draw(|frame| {
            ui::render(frame, app, &self.input);
        })?;
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(conn) = &self.connection {
            conn.stop();
        }
        self.connection = None;
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
