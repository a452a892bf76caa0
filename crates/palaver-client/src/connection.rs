//! Connection lifecycle types.

use std::time::Duration;

/// Connection state.
///
/// Exactly one instance exists per [`crate::Client`]; only the client
/// mutates it, in response to transport lifecycle events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected to the server.
    #[default]
    Disconnected,
    /// Connection attempt in progress.
    Connecting,
    /// Connection open; envelopes may flow.
    Connected,
}

/// Why a connection ended.
///
/// The reconnect policy does not distinguish the two; the reason only feeds
/// the status indicator and the logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// Orderly close from either side.
    Clean,
    /// Transport-level failure.
    Error(String),
}

/// Recovery policy of the client.
///
/// The defaults reproduce the protocol's observed behavior: retry forever
/// at a fixed 2 s delay, no backoff. Deployments that need to bound retries
/// set `max_attempts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Fixed delay between a close and the next connection attempt.
    pub delay: Duration,
    /// Number of consecutive failed attempts before giving up.
    /// `None` retries forever.
    pub max_attempts: Option<u32>,
    /// How long a `join` may stay unconfirmed before the pending switch is
    /// abandoned with a notice.
    pub join_timeout: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(2000),
            max_attempts: None,
            join_timeout: Duration::from_secs(10),
        }
    }
}
