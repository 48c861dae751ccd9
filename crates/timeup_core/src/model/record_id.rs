//! Opaque record identifiers.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque unique identifier of a task or class entry.
///
/// Uniqueness within one collection is the only contract. Seed records use
/// short fixed values, records created at runtime use random UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::RecordId;

    #[test]
    fn generated_ids_are_distinct() {
        let first = RecordId::generate();
        let second = RecordId::generate();
        assert_ne!(first, second);
        assert!(!first.is_blank());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_value(RecordId::from("cl1")).unwrap();
        assert_eq!(json, serde_json::json!("cl1"));
    }
}
