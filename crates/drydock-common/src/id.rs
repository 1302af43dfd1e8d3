//! Container identifiers.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A container ID.
///
/// IDs are not validated: the simulated runtime accepts whatever
/// identifier the caller supplies and only requires uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(String);

impl ContainerId {
    /// Length of a generated ID, matching full engine IDs.
    pub const GENERATED_LENGTH: usize = 64;

    /// Length of the short form of an ID.
    pub const SHORT_LENGTH: usize = 12;

    /// Create a container ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random container ID.
    ///
    /// The ID is a 64-character hex string built from two UUID v4s.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        bytes[..16].copy_from_slice(uuid::Uuid::new_v4().as_bytes());
        bytes[16..].copy_from_slice(uuid::Uuid::new_v4().as_bytes());
        Self(hex::encode(bytes))
    }

    /// Get the container ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a short version of the ID (first 12 characters).
    #[must_use]
    pub fn short(&self) -> &str {
        self.0
            .char_indices()
            .nth(Self::SHORT_LENGTH)
            .map_or(self.0.as_str(), |(end, _)| &self.0[..end])
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContainerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ContainerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ContainerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ContainerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn any_string_is_accepted() {
        assert_eq!(ContainerId::new("").as_str(), "");
        assert_eq!(ContainerId::from("-odd!").as_str(), "-odd!");
        assert_eq!(ContainerId::from("web".to_string()).to_string(), "web");
    }

    #[test]
    fn generate_container_id() {
        let id1 = ContainerId::generate();
        let id2 = ContainerId::generate();
        assert_ne!(id1, id2);
        assert_eq!(id1.as_str().len(), ContainerId::GENERATED_LENGTH);
        assert!(id1.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn short_id() {
        let id = ContainerId::new("0123456789abcdef");
        assert_eq!(id.short(), "0123456789ab");

        let id = ContainerId::new("tiny");
        assert_eq!(id.short(), "tiny");
    }

    #[test]
    fn lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(ContainerId::new("abc"), 1);
        assert_eq!(map.get("abc"), Some(&1));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&ContainerId::new("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }
}
