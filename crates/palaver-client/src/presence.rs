//! Presence tracking.

use palaver_proto::User;

/// Member list of the active room.
///
/// Scoped to exactly one room at a time. Every update is a destructive
/// replace in server order; the list is never patched incrementally.
#[derive(Debug, Clone, Default)]
pub struct PresenceTracker {
    members: Vec<User>,
}

impl PresenceTracker {
    /// Empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the member list wholesale.
    pub fn replace(&mut self, members: Vec<User>) {
        self.members = members;
    }

    /// Number of members currently present.
    pub fn current_count(&self) -> usize {
        self.members.len()
    }

    /// Members in server-given order.
    pub fn current_members(&self) -> &[User] {
        &self.members
    }
}
