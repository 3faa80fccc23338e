// ── Command API ──
//
// All write operations flow through a unified `Command` enum. The desk
// routes each variant to its workflow; reads bypass commands and go
// straight to store snapshots.

pub mod requests;

use crate::journal::JournalDraft;
use crate::model::{
    BankTransaction, EntityId, Guest, HousekeepingStatus, JournalEntry, Payment, Priority, Room,
    ServiceRequest,
};

pub use requests::{NewPayment, NewServiceRequest};

/// All possible write operations against the desk.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // ── Service requests ─────────────────────────────────────────────
    AddRequest(NewServiceRequest),
    AssignRequest {
        id: EntityId,
        staff_ids: Vec<EntityId>,
    },
    /// `staff_id` names who picked it up; defaults to the first assignee.
    StartRequest {
        id: EntityId,
        staff_id: Option<EntityId>,
    },
    ResolveRequest {
        id: EntityId,
        note: String,
    },
    CancelRequest {
        id: EntityId,
        reason: String,
    },
    UpdatePriority {
        id: EntityId,
        priority: Priority,
    },
    DeleteRequest {
        id: EntityId,
    },

    // ── Journal ──────────────────────────────────────────────────────
    SubmitJournalEntry(JournalDraft),
    PostJournalEntry {
        id: EntityId,
    },

    // ── Rooms & guests ───────────────────────────────────────────────
    SetHousekeeping {
        room_number: String,
        status: HousekeepingStatus,
        housekeeper: Option<EntityId>,
    },
    CheckInGuest {
        id: EntityId,
        room_number: Option<String>,
    },
    CheckOutGuest {
        id: EntityId,
    },

    // ── Banking ──────────────────────────────────────────────────────
    RecordPayment(NewPayment),
    ReconcileTransaction {
        transaction_id: EntityId,
        payment_id: EntityId,
    },
}

impl Command {
    /// Short verb for logs and dry-run output.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::AddRequest(_) => "add request",
            Self::AssignRequest { .. } => "assign request",
            Self::StartRequest { .. } => "start request",
            Self::ResolveRequest { .. } => "resolve request",
            Self::CancelRequest { .. } => "cancel request",
            Self::UpdatePriority { .. } => "update priority",
            Self::DeleteRequest { .. } => "delete request",
            Self::SubmitJournalEntry(_) => "submit journal entry",
            Self::PostJournalEntry { .. } => "post journal entry",
            Self::SetHousekeeping { .. } => "set housekeeping",
            Self::CheckInGuest { .. } => "check in guest",
            Self::CheckOutGuest { .. } => "check out guest",
            Self::RecordPayment(_) => "record payment",
            Self::ReconcileTransaction { .. } => "reconcile transaction",
        }
    }
}

/// Result of executing a command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Request(ServiceRequest),
    JournalEntry(JournalEntry),
    Room(Room),
    Guest(Guest),
    Payment(Payment),
    BankTransaction(BankTransaction),
    Removed(EntityId),
}
