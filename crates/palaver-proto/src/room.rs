//! Room names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a chat room.
///
/// User-supplied names go through [`RoomName::normalize`] before they are
/// put on the wire; names arriving from the server are taken verbatim, as
/// the server is trusted to echo names consistent with what it accepted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomName(String);

impl RoomName {
    /// Normalize a raw user-supplied name.
    ///
    /// Trims surrounding whitespace, lowercases, and strips every character
    /// outside `[a-z0-9_-]`. Returns `None` when nothing survives.
    pub fn normalize(raw: &str) -> Option<Self> {
        let name: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect();

        if name.is_empty() { None } else { Some(Self(name)) }
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn normalize_lowercases_and_strips() {
        assert_eq!(RoomName::normalize("  Rust Lang!  ").map(|r| r.0), Some("rustlang".into()));
        assert_eq!(RoomName::normalize("dev-chat_2").map(|r| r.0), Some("dev-chat_2".into()));
    }

    #[test]
    fn normalize_rejects_empty_results() {
        assert_eq!(RoomName::normalize(""), None);
        assert_eq!(RoomName::normalize("   "), None);
        assert_eq!(RoomName::normalize("!!!"), None);
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in ".{0,64}") {
            if let Some(room) = RoomName::normalize(&raw) {
                prop_assert_eq!(RoomName::normalize(room.as_str()), Some(room.clone()));
            }
        }

        #[test]
        fn normalized_names_use_the_safe_character_set(raw in ".{0,64}") {
            if let Some(room) = RoomName::normalize(&raw) {
                prop_assert!(room.as_str().chars().all(|c|
                    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'
                ));
            }
        }
    }
}
