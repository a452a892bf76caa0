//! Terminal UI for Palaver
//!
//! A thin shell over [`palaver_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic
//! [`palaver_app::Runtime`]; this crate only handles keyboard input,
//! terminal rendering, and the WebSocket transport wiring.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod input;
pub mod terminal;
pub mod ui;

use url::Url;

pub use input::{InputState, KeyInput};
pub use palaver_app::{App, AppInput, Driver, Runtime, Screen};
pub use terminal::{TerminalDriver, TerminalError};

/// Derive the stats endpoint from the chat endpoint.
///
/// `ws://host/ws/chat` polls `http://host/api/stats` (and `wss` maps to
/// `https`). Returns `None` when the endpoint cannot be parsed.
pub fn stats_url_for(endpoint: &str) -> Option<String> {
    let url = Url::parse(endpoint).ok()?;
    let scheme = match url.scheme() {
        "ws" => "http",
        "wss" => "https",
        other => other,
    };
    let host = url.host_str()?;
    let mut stats = format!("{scheme}://{host}");
    if let Some(port) = url.port() {
        stats.push_str(&format!(":{port}"));
    }
    stats.push_str("/api/stats");
    Some(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_url_maps_scheme_and_keeps_port() {
        assert_eq!(
            stats_url_for("ws://127.0.0.1:8080/ws/chat").as_deref(),
            Some("http://127.0.0.1:8080/api/stats")
        );
        assert_eq!(
            stats_url_for("wss://chat.example.org/ws/chat").as_deref(),
            Some("https://chat.example.org/api/stats")
        );
        assert_eq!(stats_url_for("not a url"), None);
    }
}
