//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific input, transport, and rendering, while the generic
//! [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use palaver_client::{ClientEnvelope, ConnectParams, TransportEvent};

use crate::App;

/// User intents produced by a frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppInput {
    /// Display name submitted on the login screen.
    SetName(String),
    /// Chat text submitted for the active room.
    SubmitChat(String),
    /// Request to switch to (or create) a room, by raw name.
    JoinRoom(String),
    /// Quit the application.
    Quit,
    /// Repaint without a state change (e.g. after a resize).
    Redraw,
}

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This keeps the
/// same orchestration code running in the production TUI and in simulation
/// tests.
pub trait Driver {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait briefly for user input and return any intents produced.
    ///
    /// Must return within a bounded interval (on the order of 100 ms) even
    /// when no input arrives, so the runtime can service its timers.
    fn poll_event(&mut self, app: &App) -> impl Future<Output = Result<Vec<AppInput>, Self::Error>>;

    /// Establish a connection to the server.
    fn connect(
        &mut self,
        params: &ConnectParams,
    ) -> impl Future<Output = Result<(), Self::Error>>;

    /// Transmit an outbound envelope.
    fn send(&mut self, envelope: ClientEnvelope) -> impl Future<Output = Result<(), Self::Error>>;

    /// Drain one pending transport event, without blocking.
    ///
    /// Returns `None` when nothing is pending. A
    /// [`TransportEvent::Closed`] must be surfaced exactly once per
    /// connection.
    fn poll_transport(&mut self) -> Option<TransportEvent>;

    /// Whether a connection is currently open.
    fn is_connected(&self) -> bool;

    /// Render the application state.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Stop the connection and clean up resources.
    fn stop(&mut self);
}
