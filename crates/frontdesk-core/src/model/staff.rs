// ── Staff domain type ──

use serde::{Deserialize, Serialize};

use super::entity_id::{EntityId, Identified};

/// Soft cap on concurrent assignments for staff who are marked unavailable.
pub const DEFAULT_ASSIGNMENT_CAP: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub is_available: bool,
    /// Seeded by the data source. The assignment workflow never updates it.
    #[serde(default)]
    pub current_assignments: u32,
}

impl StaffMember {
    /// Eligible for a new assignment: available, or still under the cap.
    pub fn is_assignable(&self, cap: u32) -> bool {
        self.is_available || self.current_assignments < cap
    }
}

impl Identified for StaffMember {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(is_available: bool, current_assignments: u32) -> StaffMember {
        StaffMember {
            id: EntityId::from("STF-1"),
            name: "Rosa".into(),
            role: "Housekeeping".into(),
            is_available,
            current_assignments,
        }
    }

    #[test]
    fn unavailable_at_cap_is_excluded() {
        assert!(!staff(false, 5).is_assignable(DEFAULT_ASSIGNMENT_CAP));
    }

    #[test]
    fn unavailable_under_cap_is_included() {
        assert!(staff(false, 4).is_assignable(DEFAULT_ASSIGNMENT_CAP));
    }

    #[test]
    fn available_is_always_included() {
        assert!(staff(true, 12).is_assignable(DEFAULT_ASSIGNMENT_CAP));
    }
}
