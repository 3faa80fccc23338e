// ── Guest service request domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::{EntityId, Identified};

/// What the guest asked for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ServiceType {
    #[serde(rename = "Room Service")]
    #[strum(to_string = "Room Service", serialize = "room-service", serialize = "room_service")]
    RoomService,
    #[serde(rename = "Housekeeping Request")]
    #[strum(
        to_string = "Housekeeping Request",
        serialize = "housekeeping",
        serialize = "housekeeping-request"
    )]
    Housekeeping,
    Maintenance,
    #[serde(rename = "Wake-up Call")]
    #[strum(
        to_string = "Wake-up Call",
        serialize = "wake-up-call",
        serialize = "wake-up",
        serialize = "wakeup"
    )]
    WakeUpCall,
    Laundry,
    Other,
}

/// Request urgency. Queue order is Urgent, High, Normal, Low.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    /// Queue rank: lower is served first.
    pub fn rank(self) -> u8 {
        match self {
            Self::Urgent => 0,
            Self::High => 1,
            Self::Normal => 2,
            Self::Low => 3,
        }
    }
}

/// Request lifecycle status.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum RequestStatus {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    #[strum(to_string = "In Progress", serialize = "in-progress", serialize = "in_progress")]
    InProgress,
    Resolved,
    Cancelled,
}

impl RequestStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Cancelled)
    }

    /// Whether the lifecycle permits moving from `self` to `next`.
    ///
    /// Open may jump straight to Resolved; nothing ever returns to Open.
    pub fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Open, Self::InProgress | Self::Resolved | Self::Cancelled)
            | (Self::InProgress, Self::Resolved | Self::Cancelled) => true,
            _ => false,
        }
    }
}

/// Kind of activity-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ActivityAction {
    Created,
    Assigned,
    Started,
    Resolved,
    Cancelled,
    #[serde(rename = "Priority Changed")]
    #[strum(to_string = "Priority Changed")]
    PriorityChanged,
}

/// One line in a request's audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub action: ActivityAction,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub details: String,
}

/// A guest service request tracked by the front desk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: EntityId,
    pub guest_name: String,
    pub room_number: String,
    pub service_type: ServiceType,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: RequestStatus,
    pub requested_at: DateTime<Utc>,
    /// Expected completion time.
    #[serde(default, alias = "expectedCompletion")]
    pub eta: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assigned_staff_ids: Vec<EntityId>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub attachment: Option<String>,
    #[serde(default)]
    pub activity: Vec<ActivityEntry>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl ServiceRequest {
    pub fn is_assigned(&self) -> bool {
        !self.assigned_staff_ids.is_empty()
    }

    pub fn is_assigned_to(&self, staff_id: &EntityId) -> bool {
        self.assigned_staff_ids.contains(staff_id)
    }

    pub(crate) fn record(
        &mut self,
        action: ActivityAction,
        at: DateTime<Utc>,
        details: impl Into<String>,
    ) {
        self.activity.push(ActivityEntry {
            action,
            timestamp: at,
            details: details.into(),
        });
    }

    /// Minutes between the request and its expected completion, if known.
    #[allow(clippy::cast_precision_loss)]
    pub fn response_minutes(&self) -> Option<f64> {
        self.eta
            .map(|eta| (eta - self.requested_at).num_seconds() as f64 / 60.0)
    }
}

impl Identified for ServiceRequest {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn priority_rank_orders_urgent_first() {
        assert!(Priority::Urgent.rank() < Priority::High.rank());
        assert!(Priority::High.rank() < Priority::Normal.rank());
        assert!(Priority::Normal.rank() < Priority::Low.rank());
    }

    #[test]
    fn service_type_labels_roundtrip() {
        assert_eq!(ServiceType::WakeUpCall.to_string(), "Wake-up Call");
        assert_eq!(
            "room service".parse::<ServiceType>().unwrap(),
            ServiceType::RoomService
        );
        assert_eq!(
            "housekeeping".parse::<ServiceType>().unwrap(),
            ServiceType::Housekeeping
        );
        assert_eq!(
            serde_json::to_string(&ServiceType::Housekeeping).unwrap(),
            "\"Housekeeping Request\""
        );
    }

    #[test]
    fn status_never_returns_to_open() {
        for status in [
            RequestStatus::InProgress,
            RequestStatus::Resolved,
            RequestStatus::Cancelled,
        ] {
            assert!(!status.can_transition_to(RequestStatus::Open));
        }
    }

    #[test]
    fn terminal_statuses_are_final() {
        assert!(!RequestStatus::Resolved.can_transition_to(RequestStatus::Cancelled));
        assert!(!RequestStatus::Cancelled.can_transition_to(RequestStatus::Resolved));
        assert!(RequestStatus::Open.can_transition_to(RequestStatus::Resolved));
    }

    #[test]
    fn response_minutes_uses_eta() {
        let requested_at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let req = ServiceRequest {
            id: EntityId::from("REQ-1"),
            guest_name: "A. Guest".into(),
            room_number: "101".into(),
            service_type: ServiceType::Laundry,
            priority: Priority::Normal,
            status: RequestStatus::Open,
            requested_at,
            eta: Some(requested_at + chrono::Duration::minutes(45)),
            assigned_staff_ids: vec![],
            notes: String::new(),
            attachment: None,
            activity: vec![],
            completed_at: None,
        };
        assert_eq!(req.response_minutes(), Some(45.0));
    }
}
