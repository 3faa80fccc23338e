// ── Typed payloads for Command variants ──
//
// Creation commands carry one of these instead of a half-built entity.
// The desk fills in ids, timestamps and status.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{EntityId, PaymentMethod, Priority, ServiceType};
use crate::validation::ValidationErrors;

// ── Service requests ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewServiceRequest {
    /// Caller-supplied id; a UUID is generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub guest_name: String,
    pub room_number: String,
    pub service_type: ServiceType,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

impl NewServiceRequest {
    pub fn new(
        guest_name: impl Into<String>,
        room_number: impl Into<String>,
        service_type: ServiceType,
    ) -> Self {
        Self {
            id: None,
            guest_name: guest_name.into(),
            room_number: room_number.into(),
            service_type,
            priority: Priority::default(),
            notes: String::new(),
            eta: None,
            attachment: None,
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if self.guest_name.trim().is_empty() {
            errors.add("guestName", "Guest name is required");
        }
        if self.room_number.trim().is_empty() {
            errors.add("roomNumber", "Room number is required");
        }
        errors
    }
}

// ── Payments ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<EntityId>,
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default)]
    pub reference: String,
}

impl NewPayment {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if !(self.amount.is_finite() && self.amount > 0.0) {
            errors.add("amount", "Amount must be greater than zero");
        }
        errors
    }
}
