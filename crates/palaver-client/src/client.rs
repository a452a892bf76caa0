//! Client state machine.
//!
//! The [`Client`] owns the connection lifecycle
//! (`Disconnected → Connecting → Connected`), routes every inbound envelope
//! to exactly one handler, and tracks room membership and presence. It is a
//! pure state machine: one event in, a list of actions out, nothing else.
//!
//! # Lifecycle
//!
//! Every transition into `Disconnected` arms the reconnect timer once, at
//! the policy's fixed delay, whether the close was clean or an error. The
//! session id obtained from the first `connected` handshake rides along on
//! every subsequent connection attempt so the server can resume the
//! session.
//!
//! # Dispatch
//!
//! Dispatch is total: unknown envelope types are ignored, and no handler
//! can affect another type's rendering. Envelopes scoped to a room other
//! than the active one are dropped, not buffered.

use palaver_proto::{ClientEnvelope, MessageKind, RoomName, ServerEnvelope, User};

use crate::{
    connection::{CloseReason, ConnectionState, ReconnectPolicy},
    event::{ClientAction, ClientEvent, DisplayMessage, RenderCommand},
    presence::PresenceTracker,
    rooms::RoomSet,
    session::{ConnectParams, Identity},
};

/// Client state machine for the Palaver protocol.
#[derive(Debug, Clone)]
pub struct Client {
    identity: Identity,
    policy: ReconnectPolicy,
    state: ConnectionState,
    rooms: RoomSet,
    presence: PresenceTracker,
    /// Room switch awaiting server confirmation.
    pending_join: Option<RoomName>,
    /// Reconnect attempts since the last successful open.
    attempts: u32,
}

impl Client {
    /// Create a client with the given identity and recovery policy.
    pub fn new(identity: Identity, policy: ReconnectPolicy) -> Self {
        Self {
            identity,
            policy,
            state: ConnectionState::Disconnected,
            rooms: RoomSet::new(),
            presence: PresenceTracker::new(),
            pending_join: None,
            attempts: 0,
        }
    }

    /// Initiate a connection using the current identity.
    ///
    /// No-op while a name is missing (the login view is still up) or while
    /// a connection is already open or in progress.
    pub fn connect(&mut self) -> Vec<ClientAction> {
        if !self.identity.has_name() || self.state != ConnectionState::Disconnected {
            return vec![];
        }
        self.begin_connect()
    }

    /// Set the display name chosen at login.
    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.identity.display_name = name.into();
    }

    /// Process one event and return the resulting actions.
    pub fn handle(&mut self, event: ClientEvent) -> Vec<ClientAction> {
        match event {
            ClientEvent::Opened => self.handle_opened(),
            ClientEvent::Closed { reason } => self.handle_closed(reason),
            ClientEvent::EnvelopeReceived(envelope) => self.dispatch(envelope),
            ClientEvent::SendChat { text } => self.handle_send_chat(&text),
            ClientEvent::SwitchRoom { room } => self.handle_switch_room(&room),
            ClientEvent::ReconnectDue => self.handle_reconnect_due(),
            ClientEvent::JoinTimeoutDue { room } => self.handle_join_timeout(&room),
        }
    }

    fn begin_connect(&mut self) -> Vec<ClientAction> {
        self.state = ConnectionState::Connecting;
        vec![
            ClientAction::Render(RenderCommand::SetStatus {
                state: ConnectionState::Connecting,
                note: None,
            }),
            ClientAction::Connect(ConnectParams::from(&self.identity)),
        ]
    }

    fn handle_opened(&mut self) -> Vec<ClientAction> {
        self.state = ConnectionState::Connected;
        self.attempts = 0;
        vec![ClientAction::Render(RenderCommand::SetStatus {
            state: ConnectionState::Connected,
            note: None,
        })]
    }

    fn handle_closed(&mut self, reason: CloseReason) -> Vec<ClientAction> {
        if self.state == ConnectionState::Disconnected {
            return vec![];
        }
        self.state = ConnectionState::Disconnected;
        self.pending_join = None;

        let note = match reason {
            CloseReason::Clean => None,
            CloseReason::Error(detail) => {
                tracing::warn!(%detail, "connection lost");
                Some(detail)
            },
        };

        let mut actions = vec![ClientAction::Render(RenderCommand::SetStatus {
            state: ConnectionState::Disconnected,
            note,
        })];

        let retry = self.policy.max_attempts.is_none_or(|max| self.attempts < max);
        if retry {
            self.attempts = self.attempts.saturating_add(1);
            actions.push(ClientAction::ScheduleReconnect { delay: self.policy.delay });
        } else {
            tracing::warn!(attempts = self.attempts, "reconnect budget exhausted, staying offline");
        }
        actions
    }

    fn handle_reconnect_due(&mut self) -> Vec<ClientAction> {
        if self.state != ConnectionState::Disconnected {
            return vec![];
        }
        self.begin_connect()
    }

    fn handle_send_chat(&self, text: &str) -> Vec<ClientAction> {
        let text = text.trim();
        if text.is_empty() {
            return vec![];
        }
        let Some(room) = self.rooms.active() else {
            tracing::debug!("dropping chat text, no active room yet");
            return vec![];
        };
        self.send(ClientEnvelope::Message { room: room.clone(), text: text.to_string() })
    }

    fn handle_switch_room(&mut self, raw: &str) -> Vec<ClientAction> {
        let Some(room) = RoomName::normalize(raw) else {
            return vec![];
        };
        if self.rooms.is_active(&room) || self.pending_join.as_ref() == Some(&room) {
            return vec![];
        }
        if self.state != ConnectionState::Connected {
            tracing::debug!(%room, "dropping join request while not connected");
            return vec![];
        }

        self.pending_join = Some(room.clone());
        vec![
            ClientAction::Send(ClientEnvelope::Join { room: room.clone() }),
            ClientAction::ScheduleJoinTimeout { room, delay: self.policy.join_timeout },
        ]
    }

    fn handle_join_timeout(&mut self, room: &RoomName) -> Vec<ClientAction> {
        if self.pending_join.as_ref() != Some(room) {
            return vec![];
        }
        self.pending_join = None;
        vec![ClientAction::Render(RenderCommand::AppendMessage(DisplayMessage::system(format!(
            "no response joining #{room}"
        ))))]
    }

    /// Route one inbound envelope to its handler.
    fn dispatch(&mut self, envelope: ServerEnvelope) -> Vec<ClientAction> {
        match envelope {
            ServerEnvelope::Connected { session_id, name, rooms } => {
                self.identity.session_id = Some(session_id);
                self.identity.display_name = name.clone();
                self.rooms.replace(rooms);
                vec![
                    ClientAction::PersistIdentity(self.identity.clone()),
                    ClientAction::Render(RenderCommand::ShowChatView { display_name: name }),
                    ClientAction::Render(RenderCommand::SetRoomList(self.rooms.names())),
                ]
            },

            ServerEnvelope::Resumed { session_id, name } => {
                self.identity.session_id = Some(session_id);
                self.identity.display_name = name.clone();
                vec![ClientAction::Render(RenderCommand::ShowChatView { display_name: name })]
            },

            ServerEnvelope::Joined { room, history, users } => {
                if self.pending_join.as_ref() == Some(&room) {
                    self.pending_join = None;
                }
                self.rooms.activate(room.clone());
                self.presence.replace(users.clone());

                let mut actions = vec![
                    ClientAction::Render(RenderCommand::SetActiveRoom(room.clone())),
                    ClientAction::Render(RenderCommand::ClearMessages),
                ];
                actions.extend(history.into_iter().map(|entry| {
                    ClientAction::Render(RenderCommand::AppendMessage(
                        DisplayMessage::from_history(&room, entry),
                    ))
                }));
                actions.push(ClientAction::Render(RenderCommand::SetPresence(users)));
                actions.push(ClientAction::Render(RenderCommand::SetRoomList(self.rooms.names())));
                actions
            },

            ServerEnvelope::Left { room } => {
                self.rooms.remove(&room);
                vec![ClientAction::Render(RenderCommand::SetRoomList(self.rooms.names()))]
            },

            ServerEnvelope::Message { room, from, text, ts } => {
                self.room_message(room, MessageKind::Chat, from, text, ts)
            },

            ServerEnvelope::Action { room, from, text, ts } => {
                self.room_message(room, MessageKind::Action, from, text, ts)
            },

            ServerEnvelope::System { text } => {
                vec![ClientAction::Render(RenderCommand::AppendMessage(DisplayMessage::system(
                    text,
                )))]
            },

            ServerEnvelope::UserJoined { room, user, users } => {
                self.membership_change(&room, &user, "joined", users)
            },

            ServerEnvelope::UserLeft { room, user, users } => {
                self.membership_change(&room, &user, "left", users)
            },

            ServerEnvelope::RoomList { rooms } => {
                self.rooms.replace(rooms);
                vec![ClientAction::Render(RenderCommand::SetRoomList(self.rooms.names()))]
            },

            ServerEnvelope::UserList { room, users } => {
                if !self.rooms.is_active(&room) {
                    return vec![];
                }
                self.presence.replace(users.clone());
                vec![ClientAction::Render(RenderCommand::SetPresence(users))]
            },

            ServerEnvelope::Error { message } => {
                vec![ClientAction::Render(RenderCommand::AppendMessage(DisplayMessage::system(
                    format!("Error: {message}"),
                )))]
            },

            ServerEnvelope::Ping { ts } => self.send(ClientEnvelope::Pong { ts }),

            ServerEnvelope::Unknown => {
                tracing::debug!("ignoring envelope with unknown type");
                vec![]
            },
        }
    }

    /// Render a room-scoped message, or drop it for an inactive room.
    fn room_message(
        &self,
        room: RoomName,
        kind: MessageKind,
        from: String,
        text: String,
        ts: Option<u64>,
    ) -> Vec<ClientAction> {
        if !self.rooms.is_active(&room) {
            tracing::debug!(%room, "dropping message for inactive room");
            return vec![];
        }
        vec![ClientAction::Render(RenderCommand::AppendMessage(DisplayMessage {
            kind,
            from: Some(from),
            text,
            ts,
            room: Some(room),
        }))]
    }

    fn membership_change(
        &mut self,
        room: &RoomName,
        user: &str,
        verb: &str,
        users: Vec<User>,
    ) -> Vec<ClientAction> {
        if !self.rooms.is_active(room) {
            return vec![];
        }
        self.presence.replace(users.clone());
        vec![
            ClientAction::Render(RenderCommand::AppendMessage(DisplayMessage::system(format!(
                "{user} {verb}"
            )))),
            ClientAction::Render(RenderCommand::SetPresence(users)),
        ]
    }

    /// Emit a send action, or discard the envelope while not connected.
    ///
    /// Sending is best-effort by contract: there is no queue and no error
    /// surfaced to the caller.
    fn send(&self, envelope: ClientEnvelope) -> Vec<ClientAction> {
        if self.state == ConnectionState::Connected {
            vec![ClientAction::Send(envelope)]
        } else {
            tracing::debug!("discarding outbound envelope while not connected");
            vec![]
        }
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Current identity, including any session id obtained so far.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The active room. `None` until the first `joined` confirmation.
    pub fn active_room(&self) -> Option<&RoomName> {
        self.rooms.active()
    }

    /// Known room names in sorted order.
    pub fn known_rooms(&self) -> Vec<RoomName> {
        self.rooms.names()
    }

    /// Presence of the active room.
    pub fn presence(&self) -> &PresenceTracker {
        &self.presence
    }
}
