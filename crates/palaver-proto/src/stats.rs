//! Aggregate server counters.

use serde::{Deserialize, Serialize};

/// Snapshot returned by the read-only stats endpoint.
///
/// Fields the endpoint omits default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStats {
    /// Users currently online, across all rooms.
    #[serde(default)]
    pub users_online: u64,
    /// Number of rooms that currently exist.
    #[serde(default)]
    pub rooms_count: u64,
}
