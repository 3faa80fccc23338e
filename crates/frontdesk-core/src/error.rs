// ── Core error types ──
//
// User-facing errors from frontdesk-core. Nothing here is fatal: every
// variant describes input the desk refused, and the store is left
// untouched when one is returned.

use thiserror::Error;

use crate::model::RequestStatus;
use crate::validation::ValidationErrors;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Lookup errors ────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    // ── Request workflow ─────────────────────────────────────────────
    #[error("Request {request_id} has no assigned staff; assign someone before starting it")]
    NoStaffAssigned { request_id: String },

    #[error("Request {request_id} cannot move from {from} to {to}")]
    InvalidTransition {
        request_id: String,
        from: RequestStatus,
        to: RequestStatus,
    },

    // ── Accounting ───────────────────────────────────────────────────
    #[error("A journal entry needs at least {minimum} lines")]
    MinimumLines { minimum: usize },

    #[error("Entry is unbalanced: debits {debits:.2} vs credits {credits:.2}")]
    Unbalanced { debits: f64, credits: f64 },

    #[error("Journal entry {reference} is already posted")]
    AlreadyPosted { reference: String },

    #[error("Cannot reconcile: {message}")]
    Reconciliation { message: String },

    // ── Data exchange ────────────────────────────────────────────────
    #[error("Export failed: {message}")]
    Export { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn not_found(entity_type: &str, identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            identifier: identifier.to_string(),
        }
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<csv::Error> for CoreError {
    fn from(err: csv::Error) -> Self {
        Self::Export {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Export {
            message: err.to_string(),
        }
    }
}
