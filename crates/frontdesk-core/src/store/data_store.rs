// ── Central reactive data store ──
//
// In-memory storage for every front-desk record kind. There is exactly
// one writer (the `Desk`), so mutation goes through `&mut self`; readers
// get cheap `Arc` snapshots or subscribe to changes.

use std::sync::Arc;

use super::collection::EntityCollection;
use crate::model::{
    BankTransaction, Campaign, EntityId, EquityClass, Guest, Invoice, JournalEntry, Lead, Payment,
    Rate, Room, ServiceRequest, Shareholder, StaffMember,
};
use crate::stream::EntityStream;

/// Central store for all front-desk records.
///
/// Collections are insertion-ordered. Mutations are broadcast to
/// subscribers via `watch` channels.
pub struct DataStore {
    pub(crate) requests: EntityCollection<ServiceRequest>,
    pub(crate) staff: EntityCollection<StaffMember>,
    pub(crate) journal_entries: EntityCollection<JournalEntry>,
    pub(crate) guests: EntityCollection<Guest>,
    pub(crate) rooms: EntityCollection<Room>,
    pub(crate) rates: EntityCollection<Rate>,
    pub(crate) invoices: EntityCollection<Invoice>,
    pub(crate) payments: EntityCollection<Payment>,
    pub(crate) bank_transactions: EntityCollection<BankTransaction>,
    pub(crate) leads: EntityCollection<Lead>,
    pub(crate) campaigns: EntityCollection<Campaign>,
    pub(crate) equity_classes: EntityCollection<EquityClass>,
    pub(crate) shareholders: EntityCollection<Shareholder>,
}

impl DataStore {
    pub fn new() -> Self {
        Self {
            requests: EntityCollection::new(),
            staff: EntityCollection::new(),
            journal_entries: EntityCollection::new(),
            guests: EntityCollection::new(),
            rooms: EntityCollection::new(),
            rates: EntityCollection::new(),
            invoices: EntityCollection::new(),
            payments: EntityCollection::new(),
            bank_transactions: EntityCollection::new(),
            leads: EntityCollection::new(),
            campaigns: EntityCollection::new(),
            equity_classes: EntityCollection::new(),
            shareholders: EntityCollection::new(),
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn requests_snapshot(&self) -> Arc<Vec<Arc<ServiceRequest>>> {
        self.requests.snapshot()
    }

    pub fn staff_snapshot(&self) -> Arc<Vec<Arc<StaffMember>>> {
        self.staff.snapshot()
    }

    pub fn journal_entries_snapshot(&self) -> Arc<Vec<Arc<JournalEntry>>> {
        self.journal_entries.snapshot()
    }

    pub fn guests_snapshot(&self) -> Arc<Vec<Arc<Guest>>> {
        self.guests.snapshot()
    }

    pub fn rooms_snapshot(&self) -> Arc<Vec<Arc<Room>>> {
        self.rooms.snapshot()
    }

    pub fn rates_snapshot(&self) -> Arc<Vec<Arc<Rate>>> {
        self.rates.snapshot()
    }

    pub fn invoices_snapshot(&self) -> Arc<Vec<Arc<Invoice>>> {
        self.invoices.snapshot()
    }

    pub fn payments_snapshot(&self) -> Arc<Vec<Arc<Payment>>> {
        self.payments.snapshot()
    }

    pub fn bank_transactions_snapshot(&self) -> Arc<Vec<Arc<BankTransaction>>> {
        self.bank_transactions.snapshot()
    }

    pub fn leads_snapshot(&self) -> Arc<Vec<Arc<Lead>>> {
        self.leads.snapshot()
    }

    pub fn campaigns_snapshot(&self) -> Arc<Vec<Arc<Campaign>>> {
        self.campaigns.snapshot()
    }

    pub fn equity_classes_snapshot(&self) -> Arc<Vec<Arc<EquityClass>>> {
        self.equity_classes.snapshot()
    }

    pub fn shareholders_snapshot(&self) -> Arc<Vec<Arc<Shareholder>>> {
        self.shareholders.snapshot()
    }

    // ── Single-entity lookups ────────────────────────────────────────

    pub fn request_by_id(&self, id: &EntityId) -> Option<Arc<ServiceRequest>> {
        self.requests.get(id)
    }

    pub fn staff_by_id(&self, id: &EntityId) -> Option<Arc<StaffMember>> {
        self.staff.get(id)
    }

    pub fn journal_entry_by_id(&self, id: &EntityId) -> Option<Arc<JournalEntry>> {
        self.journal_entries.get(id)
    }

    /// Journal entries are usually referred to by their reference number.
    pub fn journal_entry_by_reference(&self, reference: &str) -> Option<Arc<JournalEntry>> {
        self.journal_entries
            .find(|j| j.reference.eq_ignore_ascii_case(reference))
    }

    pub fn invoice_by_id(&self, id: &EntityId) -> Option<Arc<Invoice>> {
        self.invoices.get(id)
    }

    pub fn invoice_by_number(&self, number: &str) -> Option<Arc<Invoice>> {
        self.invoices.find(|i| i.number.eq_ignore_ascii_case(number))
    }

    pub fn room_by_number(&self, number: &str) -> Option<Arc<Room>> {
        self.rooms.find(|r| r.number == number)
    }

    pub fn payment_by_id(&self, id: &EntityId) -> Option<Arc<Payment>> {
        self.payments.get(id)
    }

    pub fn bank_transaction_by_id(&self, id: &EntityId) -> Option<Arc<BankTransaction>> {
        self.bank_transactions.get(id)
    }

    // ── Count accessors ──────────────────────────────────────────────

    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    pub fn staff_count(&self) -> usize {
        self.staff.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
            && self.staff.is_empty()
            && self.journal_entries.is_empty()
            && self.guests.is_empty()
            && self.rooms.is_empty()
            && self.rates.is_empty()
            && self.invoices.is_empty()
            && self.payments.is_empty()
            && self.bank_transactions.is_empty()
            && self.leads.is_empty()
            && self.campaigns.is_empty()
            && self.equity_classes.is_empty()
            && self.shareholders.is_empty()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_requests(&self) -> EntityStream<ServiceRequest> {
        EntityStream::new(self.requests.subscribe())
    }

    pub fn subscribe_journal_entries(&self) -> EntityStream<JournalEntry> {
        EntityStream::new(self.journal_entries.subscribe())
    }

    pub fn subscribe_rooms(&self) -> EntityStream<Room> {
        EntityStream::new(self.rooms.subscribe())
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}
