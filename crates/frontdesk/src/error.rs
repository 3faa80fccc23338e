//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use frontdesk_config::ConfigError;
use frontdesk_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(frontdesk::not_found),
        help("Run: frontdesk {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    /// The record exists but its current state forbids the change.
    #[error("{message}")]
    #[diagnostic(code(frontdesk::conflict))]
    Conflict { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(frontdesk::validation))]
    Validation { field: String, reason: String },

    #[error("Input rejected")]
    #[diagnostic(code(frontdesk::rejected), help("{details}"))]
    Rejected { details: String },

    // ── Data & configuration ─────────────────────────────────────────
    #[error("No dataset selected")]
    #[diagnostic(
        code(frontdesk::no_data),
        help(
            "Pass --data <FILE>, or add a property with:\n\
             frontdesk config add-property <NAME> <FILE> --default"
        )
    )]
    NoData,

    #[error("Property '{name}' not found in configuration")]
    #[diagnostic(
        code(frontdesk::property_not_found),
        help(
            "Available properties: {available}\n\
             Add one with: frontdesk config add-property"
        )
    )]
    PropertyNotFound { name: String, available: String },

    #[error("Could not read dataset {path}")]
    #[diagnostic(
        code(frontdesk::dataset),
        help("Dataset files are JSON (.json) or YAML (.yaml, .yml).\n{reason}")
    )]
    Dataset { path: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(frontdesk::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(frontdesk::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Everything else ──────────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(frontdesk::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(frontdesk::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML payload: {0}")]
    #[diagnostic(code(frontdesk::yaml), help("Check the YAML file contents and try again."))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Validation { .. }
            | Self::Rejected { .. }
            | Self::NoData
            | Self::PropertyNotFound { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

/// `frontdesk <list_command>` that shows records of this type.
fn list_command_for(entity_type: &str) -> &'static str {
    match entity_type {
        "Request" => "requests list",
        "Staff member" => "staff list",
        "Journal entry" | "Journal line" => "journal list",
        "Guest" => "guests list",
        "Room" => "rooms list",
        "Invoice" => "invoices list",
        "Payment" => "bank payments",
        "Bank transaction" => "bank list",
        _ => "search <TEXT>",
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: list_command_for(&entity_type).into(),
                resource_type: entity_type,
                identifier,
            },

            CoreError::Validation(errors) => CliError::Rejected {
                details: errors
                    .iter()
                    .map(|(field, message)| format!("{field}: {message}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            },

            err @ (CoreError::MinimumLines { .. } | CoreError::Unbalanced { .. }) => {
                CliError::Rejected {
                    details: err.to_string(),
                }
            }

            err @ (CoreError::NoStaffAssigned { .. }
            | CoreError::InvalidTransition { .. }
            | CoreError::AlreadyPosted { .. }
            | CoreError::Reconciliation { .. }) => CliError::Conflict {
                message: err.to_string(),
            },

            err @ (CoreError::Export { .. } | CoreError::Internal(_)) => {
                CliError::Internal(err.to_string())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use frontdesk_core::{RequestStatus, ValidationErrors};

    use super::*;

    #[test]
    fn core_errors_map_to_exit_codes() {
        let not_found: CliError = CoreError::NotFound {
            entity_type: "Guest".into(),
            identifier: "G-9".into(),
        }
        .into();
        assert_eq!(not_found.exit_code(), exit_code::NOT_FOUND);
        assert!(matches!(
            &not_found,
            CliError::NotFound { list_command, .. } if list_command == "guests list"
        ));

        let transition: CliError = CoreError::InvalidTransition {
            request_id: "REQ-1".into(),
            from: RequestStatus::Cancelled,
            to: RequestStatus::Resolved,
        }
        .into();
        assert_eq!(transition.exit_code(), exit_code::CONFLICT);

        let mut errors = ValidationErrors::new();
        errors.add("guestName", "Guest name is required");
        let rejected: CliError = CoreError::Validation(errors).into();
        assert_eq!(rejected.exit_code(), exit_code::USAGE);
        assert!(matches!(
            &rejected,
            CliError::Rejected { details } if details.contains("guestName")
        ));
    }
}
