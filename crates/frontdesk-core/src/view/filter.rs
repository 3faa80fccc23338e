// ── Filter predicates for list views ──
//
// Filters are evaluated against store snapshots. Every criterion that
// is set must hold; unset criteria match everything.

use chrono::NaiveDate;

use crate::model::{
    EntityId, Guest, GuestStatus, Invoice, InvoiceStatus, Lead, LeadStatus, LedgerSide, Priority,
    RequestStatus, ServiceRequest, ServiceType,
};

/// Request table filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFilter {
    pub status: Option<RequestStatus>,
    pub priority: Option<Priority>,
    pub service_type: Option<ServiceType>,
    pub assigned_to: Option<EntityId>,
    /// Inclusive, compared against the UTC calendar date of `requested_at`.
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl RequestFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, request: &ServiceRequest) -> bool {
        let day = request.requested_at.date_naive();
        self.status.is_none_or(|s| request.status == s)
            && self.priority.is_none_or(|p| request.priority == p)
            && self.service_type.is_none_or(|t| request.service_type == t)
            && self
                .assigned_to
                .as_ref()
                .is_none_or(|id| request.is_assigned_to(id))
            && self.from.is_none_or(|from| day >= from)
            && self.to.is_none_or(|to| day <= to)
    }
}

/// Guest table filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestFilter {
    pub status: Option<GuestStatus>,
    pub vip_only: bool,
    /// Guests whose stay covers this date.
    pub staying_on: Option<NaiveDate>,
}

impl GuestFilter {
    pub fn matches(&self, guest: &Guest) -> bool {
        self.status.is_none_or(|s| guest.status == s)
            && (!self.vip_only || guest.vip)
            && self
                .staying_on
                .is_none_or(|d| guest.check_in <= d && d < guest.check_out)
    }
}

/// Invoice table filter. `overdue_as_of` uses the derived overdue state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceFilter {
    pub side: Option<LedgerSide>,
    pub status: Option<InvoiceStatus>,
    pub overdue_as_of: Option<NaiveDate>,
}

impl InvoiceFilter {
    pub fn matches(&self, invoice: &Invoice) -> bool {
        self.side.is_none_or(|s| invoice.side == s)
            && self.status.is_none_or(|s| invoice.status == s)
            && self.overdue_as_of.is_none_or(|d| invoice.is_overdue(d))
    }
}

/// Lead table filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFilter {
    pub status: Option<LeadStatus>,
    pub owner: Option<EntityId>,
    pub open_only: bool,
}

impl LeadFilter {
    pub fn matches(&self, lead: &Lead) -> bool {
        self.status.is_none_or(|s| lead.status == s)
            && self
                .owner
                .as_ref()
                .is_none_or(|o| lead.owner_id.as_ref() == Some(o))
            && (!self.open_only || !lead.status.is_closed())
    }
}

/// Case-insensitive substring match over any of `fields`.
/// A blank query matches everything.
pub fn text_matches<'a>(query: &str, fields: impl IntoIterator<Item = &'a str>) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .into_iter()
        .any(|f| f.to_lowercase().contains(&needle))
}
