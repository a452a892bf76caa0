//! Wire protocol for Palaver
//!
//! Palaver speaks JSON text frames over a single persistent connection.
//! Every frame is one envelope, a JSON object tagged by a `type` field.
//! This crate defines the envelope types for both directions plus the
//! small supporting vocabulary (room names, presence entries, server
//! stats). It performs no I/O.
//!
//! # Components
//!
//! - [`ServerEnvelope`]: the thirteen server-originated envelope types
//! - [`ClientEnvelope`]: the three client-originated envelope types
//! - [`RoomName`]: normalized room identifier
//! - [`ServerStats`]: aggregate counters from the stats endpoint

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod envelope;
mod room;
mod stats;

pub use envelope::{ClientEnvelope, HistoryEntry, MessageKind, ServerEnvelope, User};
pub use room::RoomName;
pub use stats::ServerStats;
