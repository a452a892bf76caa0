//! Room membership state.

use std::collections::BTreeSet;

use palaver_proto::RoomName;

/// The active room and the set of rooms the session belongs to.
///
/// At most one room is active at a time. Activating a room never removes
/// prior memberships; only a server `left` or a wholesale `room_list`
/// replacement does.
#[derive(Debug, Clone, Default)]
pub struct RoomSet {
    active: Option<RoomName>,
    known: BTreeSet<RoomName>,
}

impl RoomSet {
    /// Empty set with no active room.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active room. `None` until the first `joined` confirmation.
    pub fn active(&self) -> Option<&RoomName> {
        self.active.as_ref()
    }

    /// Whether `room` is the active room.
    pub fn is_active(&self, room: &RoomName) -> bool {
        self.active.as_ref() == Some(room)
    }

    /// Make `room` the active room, adding it to the known set.
    pub fn activate(&mut self, room: RoomName) {
        self.known.insert(room.clone());
        self.active = Some(room);
    }

    /// Drop `room` from the known set. The active room is untouched even
    /// when it is the one removed; the server decides what we see next.
    pub fn remove(&mut self, room: &RoomName) {
        self.known.remove(room);
    }

    /// Replace the known set wholesale. Idempotent.
    pub fn replace(&mut self, rooms: impl IntoIterator<Item = RoomName>) {
        self.known = rooms.into_iter().collect();
    }

    /// Known room names in sorted order.
    pub fn names(&self) -> Vec<RoomName> {
        self.known.iter().cloned().collect()
    }
}
