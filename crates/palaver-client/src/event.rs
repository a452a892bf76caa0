//! Client events and actions.

use std::time::Duration;

use palaver_proto::{
    ClientEnvelope, HistoryEntry, MessageKind, RoomName, ServerEnvelope, ServerStats, User,
};

use crate::{
    connection::{CloseReason, ConnectionState},
    session::{ConnectParams, Identity},
};

/// Events the caller feeds into the client.
///
/// The caller is responsible for:
/// - Surfacing transport lifecycle changes ([`Opened`](Self::Opened),
///   [`Closed`](Self::Closed))
/// - Decoding inbound frames and forwarding them as
///   [`EnvelopeReceived`](Self::EnvelopeReceived)
/// - Firing the timers the client arms via
///   [`ClientAction::ScheduleReconnect`] and
///   [`ClientAction::ScheduleJoinTimeout`]
/// - Forwarding user intents (send chat text, switch room)
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// Transport connection opened.
    Opened,

    /// Transport connection closed or failed.
    Closed {
        /// Why the connection ended.
        reason: CloseReason,
    },

    /// Decoded envelope arrived from the server.
    EnvelopeReceived(ServerEnvelope),

    /// User submitted chat text for the active room.
    SendChat {
        /// Raw input text.
        text: String,
    },

    /// User asked to switch to (or create) a room.
    SwitchRoom {
        /// Raw room name; normalized before anything is sent.
        room: String,
    },

    /// A previously armed reconnect delay elapsed.
    ReconnectDue,

    /// A previously armed join-confirmation timeout elapsed.
    JoinTimeoutDue {
        /// Room the timeout was armed for.
        room: RoomName,
    },
}

/// Events a transport surfaces to the caller.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// A decoded inbound envelope.
    Envelope(ServerEnvelope),
    /// The connection ended.
    Closed {
        /// Why the connection ended.
        reason: CloseReason,
    },
}

/// Actions the client produces for the caller to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientAction {
    /// Open a connection with these parameters.
    Connect(ConnectParams),

    /// Arm the reconnect timer. Exactly one is produced per transition
    /// into `Disconnected`.
    ScheduleReconnect {
        /// Delay before the next connection attempt.
        delay: Duration,
    },

    /// Arm the join-confirmation timeout for a pending room switch.
    ScheduleJoinTimeout {
        /// Room the `join` was sent for.
        room: RoomName,
        /// How long to wait for the `joined` confirmation.
        delay: Duration,
    },

    /// Serialize and transmit an outbound envelope.
    Send(ClientEnvelope),

    /// Write the identity to persistent storage.
    PersistIdentity(Identity),

    /// Apply a render effect.
    Render(RenderCommand),
}

/// Typed render effects.
///
/// This is the whole surface the dispatcher needs from a rendering layer;
/// any sink that can apply these commands can display the client.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Leave the login view and show the chat view.
    ShowChatView {
        /// Display name to show, as accepted by the server.
        display_name: String,
    },

    /// Update the connection-status indicator.
    SetStatus {
        /// New connection state.
        state: ConnectionState,
        /// Failure detail for error closes; `None` otherwise.
        note: Option<String>,
    },

    /// Change the room shown as active.
    SetActiveRoom(RoomName),

    /// Reset the render buffer.
    ClearMessages,

    /// Append one message to the render buffer.
    AppendMessage(DisplayMessage),

    /// Replace the displayed room list.
    SetRoomList(Vec<RoomName>),

    /// Replace the displayed member list.
    SetPresence(Vec<User>),

    /// Update the aggregate server counters.
    SetStats(ServerStats),
}

/// One rendered unit in the message buffer.
///
/// Ephemeral: held only by the render layer, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMessage {
    /// Message kind.
    pub kind: MessageKind,
    /// Author display name. `None` for system notices.
    pub from: Option<String>,
    /// Message text.
    pub text: String,
    /// Unix timestamp in seconds, when known.
    pub ts: Option<u64>,
    /// Room the message belongs to. `None` for global notices.
    pub room: Option<RoomName>,
}

impl DisplayMessage {
    /// Authorless system notice.
    pub fn system(text: impl Into<String>) -> Self {
        Self { kind: MessageKind::System, from: None, text: text.into(), ts: None, room: None }
    }

    /// Message built from a history entry replayed on `joined`.
    pub fn from_history(room: &RoomName, entry: HistoryEntry) -> Self {
        Self {
            kind: entry.kind,
            from: entry.from,
            text: entry.text,
            ts: entry.ts,
            room: Some(room.clone()),
        }
    }
}
