//! Business core for a hotel operations dashboard.
//!
//! This crate owns the domain model, the in-memory store and the
//! workflows behind the front desk and back office:
//!
//! - **[`Desk`]**: Facade and single writer. [`Desk::execute()`] routes a
//!   typed [`Command`] to its workflow (service requests, journal entries,
//!   check-in/out, housekeeping, payments, reconciliation). Reads go
//!   straight to store snapshots or derived views.
//!
//! - **[`DataStore`]**: Insertion-ordered entity collections
//!   (`EntityCollection<T>`: `IndexMap` + `tokio::sync::watch` channels),
//!   seeded from an injected [`Dataset`].
//!
//! - **[`EntityStream<T>`]**: Subscription handle vended by the
//!   `DataStore`. Exposes `current()` / `latest()` / `changed()` so a UI can
//!   recompute its views after each mutation.
//!
//! - **[`view`]**: The request queue, request stats, filters and the one
//!   generic sort / paginate utility every table shares.
//!
//! - **[`journal`]**: Double-entry balance validation, drafts and the
//!   trial balance.
//!
//! - **[`export`]**: Fixed-layout CSV (every field quoted) and pretty JSON.
//!
//! - **Domain model** ([`model`]): Canonical record types with
//!   [`EntityId`] supporting both generated UUIDs and data-source codes.

pub mod clock;
pub mod command;
pub mod config;
pub mod desk;
pub mod error;
pub mod export;
pub mod journal;
pub mod model;
pub mod store;
pub mod stream;
pub mod validation;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use clock::{Clock, ManualClock, SystemClock};
pub use command::{Command, CommandResult, NewPayment, NewServiceRequest};
pub use config::DeskConfig;
pub use desk::{Desk, DeskSummary};
pub use error::CoreError;
pub use journal::{BalanceCheck, JournalDraft, TrialBalance};
pub use store::{DataStore, Dataset};
pub use stream::{EntityStream, Snapshot};
pub use validation::ValidationErrors;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Accounting
    AgingReport,
    BankTransaction,
    // Equity
    CapTable,
    // CRM
    Campaign,
    // Mixed
    DeskRecord,
    // Core identity
    EntityId,
    EquityClass,
    // Rooms & guests
    Guest,
    Holding,
    Invoice,
    JournalEntry,
    JournalLine,
    Lead,
    LedgerSide,
    Payment,
    PipelineSummary,
    Priority,
    Rate,
    RecordKind,
    RequestStatus,
    Room,
    RoomSummary,
    // Guest services
    ServiceRequest,
    ServiceType,
    Shareholder,
    StaffMember,
};
