//! Session identity.

use serde::{Deserialize, Serialize};

/// The locally persisted identity of this client.
///
/// `display_name` is chosen by the user at login; `session_id` is assigned
/// by the server on the first successful handshake and reused on every
/// reconnection attempt thereafter so the server can reattach prior context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Display name shown to other users.
    #[serde(default)]
    pub display_name: String,
    /// Opaque resumption token issued by the server. `None` before the
    /// first `connected` handshake.
    #[serde(default)]
    pub session_id: Option<String>,
}

impl Identity {
    /// Identity with a display name and no session yet.
    pub fn named(display_name: impl Into<String>) -> Self {
        Self { display_name: display_name.into(), session_id: None }
    }

    /// Whether a display name has been chosen.
    pub fn has_name(&self) -> bool {
        !self.display_name.is_empty()
    }
}

/// Parameters encoded into the connection URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectParams {
    /// Display name (`name` query parameter, required).
    pub name: String,
    /// Prior session id (`session` query parameter, optional).
    pub session: Option<String>,
}

impl From<&Identity> for ConnectParams {
    fn from(identity: &Identity) -> Self {
        Self { name: identity.display_name.clone(), session: identity.session_id.clone() }
    }
}
