//! Envelope types exchanged over the persistent connection.
//!
//! Envelopes are internally tagged by `type` with snake_case tags, matching
//! the server's JSON wire format. Fields the server may omit carry
//! `#[serde(default)]` so a sparse envelope still decodes; an envelope with
//! an unrecognized tag decodes to [`ServerEnvelope::Unknown`] and is dropped
//! by the dispatcher rather than failing the connection.

use serde::{Deserialize, Serialize};

use crate::room::RoomName;

/// Envelopes sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEnvelope {
    /// Fresh session established. Sent once after a handshake without a
    /// usable session id.
    Connected {
        /// Server-assigned opaque session id.
        session_id: String,
        /// Display name as accepted by the server.
        name: String,
        /// Rooms the session is a member of.
        #[serde(default)]
        rooms: Vec<RoomName>,
    },

    /// Prior session reattached. Room membership and history are restored
    /// server-side; no reset follows.
    Resumed {
        /// The session id that was resumed.
        session_id: String,
        /// Display name bound to the session.
        name: String,
    },

    /// Join confirmed. The named room becomes the active room.
    Joined {
        /// Room that was joined.
        room: RoomName,
        /// Recent messages of the room, oldest first.
        #[serde(default)]
        history: Vec<HistoryEntry>,
        /// Current members of the room.
        #[serde(default)]
        users: Vec<User>,
    },

    /// Membership in a room ended.
    Left {
        /// Room that was left.
        room: RoomName,
    },

    /// Chat message in a room.
    Message {
        /// Room the message belongs to.
        room: RoomName,
        /// Author display name.
        from: String,
        /// Message text.
        text: String,
        /// Unix timestamp in seconds.
        #[serde(default)]
        ts: Option<u64>,
    },

    /// Emote-style message in a room.
    Action {
        /// Room the action belongs to.
        room: RoomName,
        /// Author display name.
        from: String,
        /// Action text.
        text: String,
        /// Unix timestamp in seconds.
        #[serde(default)]
        ts: Option<u64>,
    },

    /// Server notice without an author.
    System {
        /// Notice text.
        text: String,
    },

    /// A user entered a room.
    UserJoined {
        /// Room affected.
        room: RoomName,
        /// Display name of the user.
        user: String,
        /// Updated member list of the room.
        #[serde(default)]
        users: Vec<User>,
    },

    /// A user left a room.
    UserLeft {
        /// Room affected.
        room: RoomName,
        /// Display name of the user.
        user: String,
        /// Updated member list of the room.
        #[serde(default)]
        users: Vec<User>,
    },

    /// Full replacement of the known-rooms set.
    RoomList {
        /// Rooms the session is currently a member of.
        rooms: Vec<RoomName>,
    },

    /// Full replacement of a room's member list.
    UserList {
        /// Room the list belongs to.
        room: RoomName,
        /// Current members.
        users: Vec<User>,
    },

    /// Protocol-level error. Informational only; no state rollback.
    Error {
        /// Human-readable description.
        message: String,
    },

    /// Liveness probe. Must be answered with a pong echoing `ts`.
    Ping {
        /// Probe timestamp to echo back.
        ts: u64,
    },

    /// Envelope with an unrecognized `type` tag.
    #[serde(other)]
    Unknown,
}

/// Envelopes sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEnvelope {
    /// Request membership in a room. The switch takes effect only when the
    /// server confirms with `joined`.
    Join {
        /// Target room, already normalized.
        room: RoomName,
    },

    /// Chat message for a room.
    Message {
        /// Target room.
        room: RoomName,
        /// Message text.
        text: String,
    },

    /// Reply to a server `ping`.
    Pong {
        /// Timestamp copied from the probe.
        ts: u64,
    },
}

/// Kind of a displayable message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Regular chat message.
    #[default]
    #[serde(rename = "message")]
    Chat,
    /// Emote-style message.
    Action,
    /// Authorless notice.
    System,
}

/// One entry of the history replayed on `joined`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Message kind; plain chat when absent.
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
    /// Author display name. Absent for system entries.
    #[serde(default)]
    pub from: Option<String>,
    /// Message text.
    pub text: String,
    /// Unix timestamp in seconds.
    #[serde(default)]
    pub ts: Option<u64>,
}

/// One member of a room, as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> ServerEnvelope {
        serde_json::from_str(json).expect("envelope should decode")
    }

    #[test]
    fn connected_envelope_decodes() {
        let env = decode(r#"{"type":"connected","session_id":"abc","name":"alice","rooms":["general"]}"#);
        assert_eq!(
            env,
            ServerEnvelope::Connected {
                session_id: "abc".into(),
                name: "alice".into(),
                rooms: vec![RoomName::normalize("general").expect("valid room")],
            }
        );
    }

    #[test]
    fn joined_envelope_defaults_missing_lists() {
        let env = decode(r#"{"type":"joined","room":"dev"}"#);
        let ServerEnvelope::Joined { room, history, users } = env else {
            panic!("expected joined");
        };
        assert_eq!(room.as_str(), "dev");
        assert!(history.is_empty());
        assert!(users.is_empty());
    }

    #[test]
    fn history_entry_kind_defaults_to_chat() {
        let env = decode(
            r#"{"type":"joined","room":"dev","history":[{"from":"bob","text":"hi","ts":100}]}"#,
        );
        let ServerEnvelope::Joined { history, .. } = env else {
            panic!("expected joined");
        };
        assert_eq!(history[0].kind, MessageKind::Chat);
        assert_eq!(history[0].from.as_deref(), Some("bob"));
        assert_eq!(history[0].ts, Some(100));
    }

    #[test]
    fn unknown_type_decodes_to_unknown() {
        let env = decode(r#"{"type":"topic_changed","room":"dev","topic":"rust"}"#);
        assert_eq!(env, ServerEnvelope::Unknown);
    }

    #[test]
    fn ping_round_trips_timestamp() {
        let env = decode(r#"{"type":"ping","ts":555}"#);
        assert_eq!(env, ServerEnvelope::Ping { ts: 555 });
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(serde_json::from_str::<ServerEnvelope>("{not json").is_err());
    }

    #[test]
    fn outbound_envelopes_serialize_with_type_tag() {
        let room = RoomName::normalize("dev").expect("valid room");

        let join = serde_json::to_value(ClientEnvelope::Join { room: room.clone() })
            .expect("join should serialize");
        assert_eq!(join, serde_json::json!({"type": "join", "room": "dev"}));

        let message =
            serde_json::to_value(ClientEnvelope::Message { room, text: "hello".into() })
                .expect("message should serialize");
        assert_eq!(
            message,
            serde_json::json!({"type": "message", "room": "dev", "text": "hello"})
        );

        let pong =
            serde_json::to_value(ClientEnvelope::Pong { ts: 555 }).expect("pong should serialize");
        assert_eq!(pong, serde_json::json!({"type": "pong", "ts": 555}));
    }
}
