// ── Core identity type ──
//
// Every record in the store is keyed by an EntityId. Records created
// through the desk get a fresh UUID; records seeded from a dataset keep
// whatever code the data source assigned ("REQ-001", "INV-2024-0042").

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Canonical identifier for any front-desk record.
///
/// Transparently wraps either a generated UUID or a caller-supplied code.
/// Consumers compare and display both the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Uuid(Uuid),
    Code(String),
}

impl EntityId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self::Uuid(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Self::Uuid(u) => Some(u),
            Self::Code(_) => None,
        }
    }

    pub fn as_code(&self) -> Option<&str> {
        match self {
            Self::Code(s) => Some(s),
            Self::Uuid(_) => None,
        }
    }

    /// Case-insensitive match against user input (CLI arguments, search boxes).
    pub fn matches(&self, input: &str) -> bool {
        match self {
            Self::Uuid(u) => Uuid::parse_str(input.trim()).is_ok_and(|parsed| parsed == *u),
            Self::Code(s) => s.eq_ignore_ascii_case(input.trim()),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uuid(u) => write!(f, "{u}"),
            Self::Code(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl From<Uuid> for EntityId {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        match Uuid::parse_str(&s) {
            Ok(u) => Self::Uuid(u),
            Err(_) => Self::Code(s),
        }
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

/// Anything stored in an `EntityCollection`.
pub trait Identified {
    fn id(&self) -> &EntityId;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_from_uuid_string() {
        let id = EntityId::from("550e8400-e29b-41d4-a716-446655440000".to_owned());
        assert!(id.as_uuid().is_some());
    }

    #[test]
    fn entity_id_from_code() {
        let id = EntityId::from("REQ-001");
        assert_eq!(id.as_code(), Some("REQ-001"));
    }

    #[test]
    fn entity_id_from_str_roundtrips_display() {
        let id: EntityId = "INV-2024-0042".parse().unwrap();
        assert_eq!(id.to_string(), "INV-2024-0042");
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(EntityId::generate(), EntityId::generate());
    }

    #[test]
    fn matches_ignores_case_for_codes() {
        let id = EntityId::from("req-007");
        assert!(id.matches("REQ-007"));
        assert!(!id.matches("REQ-008"));
    }

    #[test]
    fn serializes_untagged() {
        let id = EntityId::from("GST-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"GST-1\"");
    }
}
