// ── Cross-entity search and dashboard roll-ups ──

use std::sync::Arc;

use serde::Serialize;

use super::Desk;
use crate::model::{
    BankTransaction, Campaign, CapTable, DeskRecord, EquityClass, Guest, Holding, Invoice,
    JournalEntry, Lead, LedgerSide, Payment, PipelineSummary, Rate, Room, RoomSummary,
    ServiceRequest, Shareholder, StaffMember,
};
use crate::view::{
    self, CampaignColumn, LeadColumn, LeadFilter, Page, RequestStats, ShareholderColumn,
    TableState, text_matches,
};

/// Everything the dashboard landing page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeskSummary {
    pub requests: RequestStats,
    pub rooms: RoomSummary,
    pub arrivals_today: usize,
    pub departures_today: usize,
    pub in_house: usize,
    pub receivables_outstanding: f64,
    pub receivables_overdue: f64,
    pub payables_outstanding: f64,
    pub unreconciled_transactions: usize,
    pub pipeline: PipelineSummary,
}

/// Text fields quick search looks at.
trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for ServiceRequest {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.guest_name.as_str(), self.room_number.as_str(), self.notes.as_str()]
    }
}

impl Searchable for StaffMember {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.role.as_str()]
    }
}

impl Searchable for JournalEntry {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.reference.as_str(), self.description.as_str()]
    }
}

impl Searchable for Guest {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str(), self.phone.as_str()];
        fields.extend(self.room_number.as_deref());
        fields
    }
}

impl Searchable for Room {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.number.as_str()]
    }
}

impl Searchable for Rate {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

impl Searchable for Invoice {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.number.as_str(), self.counterparty.as_str()]
    }
}

impl Searchable for Payment {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.reference.as_str()]
    }
}

impl Searchable for BankTransaction {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.description.as_str()]
    }
}

impl Searchable for Lead {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.company.as_str(), self.email.as_str()]
    }
}

impl Searchable for Campaign {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

impl Searchable for EquityClass {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

impl Searchable for Shareholder {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }
}

fn push_matches<T: Searchable + Clone>(
    out: &mut Vec<DeskRecord>,
    items: &[Arc<T>],
    query: &str,
    wrap: impl Fn(T) -> DeskRecord,
) {
    out.extend(
        items
            .iter()
            .filter(|item| text_matches(query, item.search_fields()))
            .map(|item| wrap((**item).clone())),
    );
}

impl Desk {
    /// Case-insensitive quick search across every record kind.
    /// A blank query finds nothing.
    pub fn search(&self, query: &str) -> Vec<DeskRecord> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let s = &self.store;
        let mut out = Vec::new();
        push_matches(&mut out, s.requests_snapshot().as_slice(), query, DeskRecord::Request);
        push_matches(&mut out, s.staff_snapshot().as_slice(), query, DeskRecord::Staff);
        push_matches(&mut out, s.journal_entries_snapshot().as_slice(), query, DeskRecord::JournalEntry);
        push_matches(&mut out, s.guests_snapshot().as_slice(), query, DeskRecord::Guest);
        push_matches(&mut out, s.rooms_snapshot().as_slice(), query, DeskRecord::Room);
        push_matches(&mut out, s.rates_snapshot().as_slice(), query, DeskRecord::Rate);
        push_matches(&mut out, s.invoices_snapshot().as_slice(), query, DeskRecord::Invoice);
        push_matches(&mut out, s.payments_snapshot().as_slice(), query, DeskRecord::Payment);
        push_matches(&mut out, s.bank_transactions_snapshot().as_slice(), query, DeskRecord::BankTransaction);
        push_matches(&mut out, s.leads_snapshot().as_slice(), query, DeskRecord::Lead);
        push_matches(&mut out, s.campaigns_snapshot().as_slice(), query, DeskRecord::Campaign);
        push_matches(&mut out, s.equity_classes_snapshot().as_slice(), query, DeskRecord::EquityClass);
        push_matches(&mut out, s.shareholders_snapshot().as_slice(), query, DeskRecord::Shareholder);
        out
    }

    pub fn pipeline(&self) -> PipelineSummary {
        PipelineSummary::from_leads(self.store.leads_snapshot().iter().map(AsRef::as_ref))
    }

    pub fn cap_table(&self) -> CapTable {
        CapTable::from_shareholders(self.store.shareholders_snapshot().iter().map(AsRef::as_ref))
    }

    pub fn leads_page(&self, filter: &LeadFilter, table: &TableState<LeadColumn>) -> Page<Arc<Lead>> {
        let snapshot = self.store.leads_snapshot();
        view::build_page(snapshot.as_slice(), |l| filter.matches(l), table)
    }

    pub fn campaigns_page(&self, table: &TableState<CampaignColumn>) -> Page<Arc<Campaign>> {
        let snapshot = self.store.campaigns_snapshot();
        view::build_page(snapshot.as_slice(), |_| true, table)
    }

    /// Cap-table rows with ownership percentages.
    pub fn shareholders_page(&self, table: &TableState<ShareholderColumn>) -> Page<Holding> {
        let holdings = self.cap_table().holdings;
        view::build_page(&holdings, |_| true, table)
    }

    pub fn summary(&self) -> DeskSummary {
        let receivables = self.aging(LedgerSide::Receivable);
        let payables = self.aging(LedgerSide::Payable);
        DeskSummary {
            requests: self.request_stats(),
            rooms: self.room_summary(),
            arrivals_today: self.arrivals_today().len(),
            departures_today: self.departures_today().len(),
            in_house: self
                .store
                .guests_snapshot()
                .iter()
                .filter(|g| g.is_in_house())
                .count(),
            receivables_outstanding: receivables.total,
            receivables_overdue: receivables.total - receivables.current,
            payables_outstanding: payables.total,
            unreconciled_transactions: self.unreconciled_transactions().len(),
            pipeline: self.pipeline(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::super::test_support::{desk_with, staff};
    use super::*;
    use crate::model::{EntityId, EquityType, GuestStatus, LeadSource, LeadStatus, RecordKind};
    use crate::store::Dataset;
    use crate::view::{SortDirection, SortState};

    fn shareholder(id: &str, name: &str, shares: u64) -> Shareholder {
        Shareholder {
            id: EntityId::from(id),
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            shares_held: shares,
            equity_type: EquityType::Common,
            join_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    fn guest(name: &str, status: GuestStatus) -> Guest {
        Guest {
            id: EntityId::generate(),
            name: name.into(),
            email: String::new(),
            phone: String::new(),
            room_number: None,
            check_in: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            status,
            vip: false,
            total_spent: 0.0,
        }
    }

    fn lead(name: &str, status: LeadStatus, value: f64) -> Lead {
        Lead {
            id: EntityId::generate(),
            name: name.into(),
            company: "Globex".into(),
            email: String::new(),
            phone: String::new(),
            source: LeadSource::Referral,
            status,
            estimated_value: value,
            probability_pct: 50.0,
            created_at: super::super::test_support::start_time(),
            owner_id: None,
        }
    }

    fn dataset() -> Dataset {
        Dataset {
            staff: vec![staff("STF-1", "Dana Whitlock", true, 0)],
            guests: vec![
                guest("Dana Scully", GuestStatus::CheckedIn),
                guest("Fox Mulder", GuestStatus::CheckedIn),
            ],
            leads: vec![
                lead("Conference", LeadStatus::Proposal, 10_000.0),
                lead("Wedding", LeadStatus::Won, 8_000.0),
                lead("Retreat", LeadStatus::Lost, 2_000.0),
            ],
            shareholders: vec![
                shareholder("SH-1", "Avery", 750),
                shareholder("SH-2", "Blake", 250),
            ],
            ..Dataset::default()
        }
    }

    #[test]
    fn search_spans_record_kinds() {
        let (desk, _clock) = desk_with(dataset());
        let hits = desk.search("DANA");
        let kinds: Vec<RecordKind> = hits.iter().map(DeskRecord::kind).collect();
        assert_eq!(kinds, vec![RecordKind::Staff, RecordKind::Guest]);
        assert!(desk.search("   ").is_empty());
    }

    #[test]
    fn summary_rolls_up_every_panel() {
        let (desk, _clock) = desk_with(dataset());
        let summary = desk.summary();
        assert_eq!(summary.in_house, 2);
        assert_eq!(summary.pipeline.open_leads, 1);
        assert!((summary.pipeline.win_rate_pct - 50.0).abs() < 1e-9);
        assert!(summary.receivables_outstanding.abs() < 1e-9);
    }

    #[test]
    fn shareholders_sort_by_ownership() {
        let (desk, _clock) = desk_with(dataset());
        let table = TableState {
            sort: SortState::by(ShareholderColumn::Ownership, SortDirection::Descending),
            ..TableState::default()
        };
        let page = desk.shareholders_page(&table);
        assert_eq!(page.items[0].shareholder.name, "Avery");
        assert!((page.items[0].ownership_pct - 75.0).abs() < 1e-9);
        assert!((page.items[1].ownership_pct - 25.0).abs() < 1e-9);
    }
}
