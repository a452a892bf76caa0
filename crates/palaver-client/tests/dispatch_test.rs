//! Integration tests for the client state machine against raw wire JSON.
//!
//! Envelopes are decoded from literal JSON the way the transport would
//! decode them, then fed through the state machine, and the resulting
//! actions are checked against the protocol contract.

use palaver_client::{
    Client, ClientAction, ClientEnvelope, ClientEvent, CloseReason, ConnectionState,
    DisplayMessage, Identity, MessageKind, ReconnectPolicy, RenderCommand, RoomName,
    ServerEnvelope,
};

fn wire(json: &str) -> ClientEvent {
    let envelope: ServerEnvelope = serde_json::from_str(json).expect("wire JSON should decode");
    ClientEvent::EnvelopeReceived(envelope)
}

fn room(name: &str) -> RoomName {
    RoomName::normalize(name).expect("valid room name")
}

fn connected_client() -> Client {
    let mut client = Client::new(Identity::named("alice"), ReconnectPolicy::default());
    let _ = client.connect();
    let _ = client.handle(ClientEvent::Opened);
    client
}

fn render_commands(actions: &[ClientAction]) -> Vec<RenderCommand> {
    actions
        .iter()
        .filter_map(|a| match a {
            ClientAction::Render(cmd) => Some(cmd.clone()),
            _ => None,
        })
        .collect()
}

/// Scenario 1: fresh connect, no prior session.
#[test]
fn fresh_handshake_persists_session_and_shows_chat() {
    let mut client = connected_client();
    let actions = client.handle(wire(
        r#"{"type":"connected","session_id":"abc","name":"alice","rooms":["general"]}"#,
    ));

    let persisted = actions.iter().find_map(|a| match a {
        ClientAction::PersistIdentity(identity) => Some(identity.clone()),
        _ => None,
    });
    let identity = persisted.expect("connected should persist the identity");
    assert_eq!(identity.session_id.as_deref(), Some("abc"));
    assert_eq!(identity.display_name, "alice");

    let commands = render_commands(&actions);
    assert!(commands.iter().any(|c| matches!(
        c,
        RenderCommand::ShowChatView { display_name } if display_name == "alice"
    )));
    assert_eq!(client.known_rooms(), vec![room("general")]);
}

/// Scenario 2: joined replaces the buffer with history, in order.
#[test]
fn joined_resets_buffer_and_replays_history() {
    let mut client = connected_client();
    let actions = client.handle(wire(
        r#"{"type":"joined","room":"dev","history":[{"from":"bob","text":"hi","ts":100}],"users":[{"name":"bob"}]}"#,
    ));

    let commands = render_commands(&actions);
    let clear_at = commands
        .iter()
        .position(|c| matches!(c, RenderCommand::ClearMessages))
        .expect("joined should clear the buffer");
    let appended: Vec<&DisplayMessage> = commands
        .iter()
        .enumerate()
        .filter_map(|(i, c)| match c {
            RenderCommand::AppendMessage(msg) => Some((i, msg)),
            _ => None,
        })
        .map(|(i, msg)| {
            assert!(i > clear_at, "history must replay after the buffer reset");
            msg
        })
        .collect();

    assert_eq!(appended.len(), 1);
    assert_eq!(appended[0].from.as_deref(), Some("bob"));
    assert_eq!(appended[0].text, "hi");
    assert_eq!(appended[0].ts, Some(100));

    assert_eq!(client.active_room(), Some(&room("dev")));
    assert_eq!(client.presence().current_count(), 1);
    assert_eq!(client.presence().current_members()[0].name, "bob");
}

/// Scenario 3: ping is answered with a pong echoing the timestamp.
#[test]
fn ping_produces_exactly_one_pong() {
    let mut client = connected_client();
    let actions = client.handle(wire(r#"{"type":"ping","ts":555}"#));

    let pongs: Vec<_> = actions
        .iter()
        .filter(|a| matches!(a, ClientAction::Send(ClientEnvelope::Pong { ts: 555 })))
        .collect();
    assert_eq!(pongs.len(), 1);
    assert_eq!(actions.len(), 1, "ping must have no other effect");
}

/// Scenario 4, state-machine half: the close schedules one reconnect at the
/// policy delay, the retry carries the session id, and the active room
/// survives without a fresh `join`.
#[test]
fn reconnect_preserves_session_and_active_room() {
    let mut client = connected_client();
    let _ = client.handle(wire(
        r#"{"type":"connected","session_id":"abc","name":"alice","rooms":["general"]}"#,
    ));
    let _ = client.handle(wire(r#"{"type":"joined","room":"dev"}"#));

    let actions = client.handle(ClientEvent::Closed { reason: CloseReason::Clean });
    let delays: Vec<_> = actions
        .iter()
        .filter_map(|a| match a {
            ClientAction::ScheduleReconnect { delay } => Some(*delay),
            _ => None,
        })
        .collect();
    assert_eq!(delays, vec![ReconnectPolicy::default().delay]);

    let actions = client.handle(ClientEvent::ReconnectDue);
    let params = actions
        .iter()
        .find_map(|a| match a {
            ClientAction::Connect(params) => Some(params.clone()),
            _ => None,
        })
        .expect("reconnect should attempt a connection");
    assert_eq!(params.session.as_deref(), Some("abc"));
    assert!(
        !actions.iter().any(|a| matches!(a, ClientAction::Send(ClientEnvelope::Join { .. }))),
        "no join is re-sent on resumption"
    );

    let _ = client.handle(ClientEvent::Opened);
    let _ = client.handle(wire(r#"{"type":"resumed","session_id":"abc","name":"alice"}"#));
    assert_eq!(client.active_room(), Some(&room("dev")));
    assert_eq!(client.state(), ConnectionState::Connected);
}

#[test]
fn inactive_room_messages_have_no_effect() {
    let mut client = connected_client();
    let _ = client.handle(wire(r#"{"type":"joined","room":"dev"}"#));

    let presence_before = client.presence().current_count();
    let actions = client.handle(wire(
        r#"{"type":"message","room":"general","from":"bob","text":"psst","ts":7}"#,
    ));
    assert!(actions.is_empty());

    let actions = client.handle(wire(
        r#"{"type":"user_joined","room":"general","user":"carol","users":[{"name":"carol"}]}"#,
    ));
    assert!(actions.is_empty());
    assert_eq!(client.presence().current_count(), presence_before);
}

#[test]
fn active_room_traffic_renders() {
    let mut client = connected_client();
    let _ = client.handle(wire(r#"{"type":"joined","room":"dev"}"#));

    let actions =
        client.handle(wire(r#"{"type":"message","room":"dev","from":"bob","text":"hi","ts":7}"#));
    let commands = render_commands(&actions);
    assert!(matches!(
        &commands[..],
        [RenderCommand::AppendMessage(msg)]
            if msg.kind == MessageKind::Chat && msg.from.as_deref() == Some("bob")
    ));

    let actions =
        client.handle(wire(r#"{"type":"action","room":"dev","from":"bob","text":"waves"}"#));
    let commands = render_commands(&actions);
    assert!(matches!(
        &commands[..],
        [RenderCommand::AppendMessage(msg)] if msg.kind == MessageKind::Action
    ));

    let actions = client.handle(wire(
        r#"{"type":"user_left","room":"dev","user":"bob","users":[]}"#,
    ));
    let commands = render_commands(&actions);
    assert!(commands.iter().any(|c| matches!(
        c,
        RenderCommand::AppendMessage(msg)
            if msg.kind == MessageKind::System && msg.text == "bob left"
    )));
    assert!(commands.iter().any(|c| matches!(
        c,
        RenderCommand::SetPresence(users) if users.is_empty()
    )));
}

#[test]
fn room_list_replaces_the_known_set_idempotently() {
    let mut client = connected_client();
    let _ = client.handle(wire(
        r#"{"type":"connected","session_id":"abc","name":"alice","rooms":["general","dev"]}"#,
    ));

    let _ = client.handle(wire(r#"{"type":"room_list","rooms":["help","dev"]}"#));
    let first = client.known_rooms();
    let _ = client.handle(wire(r#"{"type":"room_list","rooms":["help","dev"]}"#));

    assert_eq!(client.known_rooms(), first);
    assert_eq!(client.known_rooms(), vec![room("dev"), room("help")]);
}

#[test]
fn left_removes_membership_only() {
    let mut client = connected_client();
    let _ = client.handle(wire(r#"{"type":"joined","room":"dev"}"#));
    let _ = client.handle(wire(r#"{"type":"joined","room":"general"}"#));

    let actions = client.handle(wire(r#"{"type":"left","room":"dev"}"#));
    let commands = render_commands(&actions);
    assert!(matches!(
        &commands[..],
        [RenderCommand::SetRoomList(names)] if names == &vec![room("general")]
    ));
    assert_eq!(client.active_room(), Some(&room("general")));
}

#[test]
fn protocol_error_renders_a_notice_without_state_change() {
    let mut client = connected_client();
    let _ = client.handle(wire(r#"{"type":"joined","room":"dev"}"#));
    let rooms_before = client.known_rooms();

    let actions = client.handle(wire(r#"{"type":"error","message":"room is full"}"#));
    let commands = render_commands(&actions);
    assert!(matches!(
        &commands[..],
        [RenderCommand::AppendMessage(msg)]
            if msg.kind == MessageKind::System && msg.text == "Error: room is full"
    ));
    assert_eq!(client.known_rooms(), rooms_before);
    assert_eq!(client.active_room(), Some(&room("dev")));
}

#[test]
fn unknown_envelope_types_are_ignored() {
    let mut client = connected_client();
    let actions = client.handle(wire(r#"{"type":"shiny_new_feature","payload":42}"#));
    assert!(actions.is_empty());
}

#[test]
fn user_list_for_active_room_replaces_presence() {
    let mut client = connected_client();
    let _ = client.handle(wire(
        r#"{"type":"joined","room":"dev","users":[{"name":"alice"},{"name":"bob"}]}"#,
    ));
    assert_eq!(client.presence().current_count(), 2);

    let _ = client.handle(wire(r#"{"type":"user_list","room":"dev","users":[{"name":"alice"}]}"#));
    assert_eq!(client.presence().current_count(), 1);

    // A list for another room is inert.
    let _ = client.handle(wire(
        r#"{"type":"user_list","room":"general","users":[{"name":"x"},{"name":"y"},{"name":"z"}]}"#,
    ));
    assert_eq!(client.presence().current_count(), 1);
}
