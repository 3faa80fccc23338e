// ── Unified domain model ──
//
// Every type in this module is the canonical representation of a
// front-desk record. Derived figures (totals, percentages, balances) are
// computed on read and never stored.

pub mod entity_id;

pub mod banking;
pub mod campaign;
pub mod equity;
pub mod guest;
pub mod invoice;
pub mod journal;
pub mod lead;
pub mod rate;
pub mod record;
pub mod request;
pub mod room;
pub mod staff;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use frontdesk_core::model::*` gives you everything.

pub use entity_id::{EntityId, Identified};

// Guest services
pub use request::{
    ActivityAction, ActivityEntry, Priority, RequestStatus, ServiceRequest, ServiceType,
};
pub use staff::{DEFAULT_ASSIGNMENT_CAP, StaffMember};

// Rooms, guests, rates
pub use guest::{Guest, GuestStatus};
pub use rate::{Rate, RateStatus};
pub use room::{HousekeepingStatus, Room, RoomStatus, RoomSummary, RoomType};

// Accounting
pub use banking::{BankTransaction, Payment, PaymentMethod};
pub use invoice::{AgingBucket, AgingReport, Invoice, InvoiceItem, InvoiceStatus, LedgerSide};
pub use journal::{JournalEntry, JournalLine, LineType};

// CRM
pub use campaign::{Campaign, CampaignChannel, CampaignStatus};
pub use lead::{Lead, LeadSource, LeadStatus, PipelineSummary};

// Equity
pub use equity::{CapTable, EquityClass, EquityType, Holding, Shareholder};

// Mixed
pub use record::{DeskRecord, RecordKind};
