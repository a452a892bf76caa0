//! Client
//!
//! Action-based client state machine for the Palaver chat protocol. Manages
//! the connection lifecycle, inbound envelope dispatch, room membership, and
//! presence tracking.
//!
//! # Architecture
//!
//! The client is Sans-IO: it receives events ([`ClientEvent`]), processes
//! them through pure state machine logic, and returns actions
//! ([`ClientAction`]) for the caller to execute. Timers, sockets, storage,
//! and rendering all live with the caller; the state machine never blocks
//! and never touches a clock.
//!
//! # Components
//!
//! - [`Client`]: the connection-lifecycle and dispatch state machine
//! - [`ClientEvent`] / [`ClientAction`]: inputs and outputs of the machine
//! - [`RenderCommand`]: the typed render effects consumed by a render sink
//! - [`RoomSet`]: active room plus known-rooms membership
//! - [`PresenceTracker`]: member list of the active room
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides:
//! - [`transport::ConnectedClient`]: client endpoint of a WebSocket link
//! - [`transport::connect`]: connect to a server

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod connection;
mod event;
mod presence;
mod rooms;
mod session;

#[cfg(feature = "transport")]
pub mod transport;

pub use client::Client;
pub use connection::{CloseReason, ConnectionState, ReconnectPolicy};
pub use event::{ClientAction, ClientEvent, DisplayMessage, RenderCommand, TransportEvent};
pub use palaver_proto::{ClientEnvelope, MessageKind, RoomName, ServerEnvelope, ServerStats, User};
pub use presence::PresenceTracker;
pub use rooms::RoomSet;
pub use session::{ConnectParams, Identity};
