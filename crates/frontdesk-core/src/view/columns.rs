// ── Sortable columns per table ──
//
// Each list view names its columns here. The column enums parse from
// CLI input (`--sort due-date`) and map a row to the value the generic
// comparator sees.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

use super::table::{SortValue, Sortable};
use crate::model::{Campaign, Guest, Holding, Invoice, Lead, Rate, Room, ServiceRequest};

/// Request table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum RequestColumn {
    Guest,
    Room,
    Service,
    Priority,
    Status,
    RequestedAt,
    Eta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum GuestColumn {
    Name,
    Email,
    Room,
    CheckIn,
    CheckOut,
    Nights,
    Status,
    TotalSpent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum RoomColumn {
    Number,
    Floor,
    Type,
    Status,
    Housekeeping,
    LastCleaned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum RateColumn {
    Name,
    RoomType,
    BaseRate,
    Discount,
    EffectiveRate,
    ValidFrom,
    ValidTo,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum InvoiceColumn {
    Number,
    Counterparty,
    IssueDate,
    DueDate,
    Total,
    BalanceDue,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum LeadColumn {
    Name,
    Company,
    Source,
    Status,
    Value,
    Probability,
    WeightedValue,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum CampaignColumn {
    Name,
    Channel,
    Status,
    StartDate,
    Budget,
    Spent,
    OpenRate,
    ConversionRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ShareholderColumn {
    Name,
    Email,
    SharesHeld,
    Ownership,
    EquityType,
    JoinDate,
}

impl Sortable for ServiceRequest {
    type Column = RequestColumn;

    fn sort_value(&self, column: RequestColumn) -> SortValue<'_> {
        match column {
            RequestColumn::Guest => self.guest_name.as_str().into(),
            RequestColumn::Room => self.room_number.as_str().into(),
            RequestColumn::Service => self.service_type.to_string().into(),
            // Rank order so ascending means most urgent first.
            RequestColumn::Priority => f64::from(self.priority.rank()).into(),
            RequestColumn::Status => self.status.to_string().into(),
            RequestColumn::RequestedAt => self.requested_at.into(),
            RequestColumn::Eta => self.eta.into(),
        }
    }
}

impl Sortable for Guest {
    type Column = GuestColumn;

    fn sort_value(&self, column: GuestColumn) -> SortValue<'_> {
        match column {
            GuestColumn::Name => self.name.as_str().into(),
            GuestColumn::Email => self.email.as_str().into(),
            GuestColumn::Room => self.room_number.as_deref().into(),
            GuestColumn::CheckIn => self.check_in.into(),
            GuestColumn::CheckOut => self.check_out.into(),
            GuestColumn::Nights => f64::from(self.nights()).into(),
            GuestColumn::Status => self.status.to_string().into(),
            GuestColumn::TotalSpent => self.total_spent.into(),
        }
    }
}

impl Sortable for Room {
    type Column = RoomColumn;

    fn sort_value(&self, column: RoomColumn) -> SortValue<'_> {
        match column {
            RoomColumn::Number => self.number.as_str().into(),
            RoomColumn::Floor => f64::from(self.floor).into(),
            RoomColumn::Type => self.room_type.to_string().into(),
            RoomColumn::Status => self.status.to_string().into(),
            RoomColumn::Housekeeping => self.housekeeping.to_string().into(),
            RoomColumn::LastCleaned => self.last_cleaned.into(),
        }
    }
}

impl Sortable for Rate {
    type Column = RateColumn;

    fn sort_value(&self, column: RateColumn) -> SortValue<'_> {
        match column {
            RateColumn::Name => self.name.as_str().into(),
            RateColumn::RoomType => self.room_type.to_string().into(),
            RateColumn::BaseRate => self.base_rate.into(),
            RateColumn::Discount => self.discount_pct.into(),
            RateColumn::EffectiveRate => self.effective_rate().into(),
            RateColumn::ValidFrom => self.valid_from.into(),
            RateColumn::ValidTo => self.valid_to.into(),
            RateColumn::Status => self.status.to_string().into(),
        }
    }
}

impl Sortable for Invoice {
    type Column = InvoiceColumn;

    fn sort_value(&self, column: InvoiceColumn) -> SortValue<'_> {
        match column {
            InvoiceColumn::Number => self.number.as_str().into(),
            InvoiceColumn::Counterparty => self.counterparty.as_str().into(),
            InvoiceColumn::IssueDate => self.issue_date.into(),
            InvoiceColumn::DueDate => self.due_date.into(),
            InvoiceColumn::Total => self.total().into(),
            InvoiceColumn::BalanceDue => self.balance_due().into(),
            InvoiceColumn::Status => self.status.to_string().into(),
        }
    }
}

impl Sortable for Lead {
    type Column = LeadColumn;

    fn sort_value(&self, column: LeadColumn) -> SortValue<'_> {
        match column {
            LeadColumn::Name => self.name.as_str().into(),
            LeadColumn::Company => self.company.as_str().into(),
            LeadColumn::Source => self.source.to_string().into(),
            LeadColumn::Status => self.status.to_string().into(),
            LeadColumn::Value => self.estimated_value.into(),
            LeadColumn::Probability => self.probability_pct.into(),
            LeadColumn::WeightedValue => self.weighted_value().into(),
            LeadColumn::CreatedAt => self.created_at.into(),
        }
    }
}

impl Sortable for Campaign {
    type Column = CampaignColumn;

    fn sort_value(&self, column: CampaignColumn) -> SortValue<'_> {
        match column {
            CampaignColumn::Name => self.name.as_str().into(),
            CampaignColumn::Channel => self.channel.to_string().into(),
            CampaignColumn::Status => self.status.to_string().into(),
            CampaignColumn::StartDate => self.start_date.into(),
            CampaignColumn::Budget => self.budget.into(),
            CampaignColumn::Spent => self.spent.into(),
            CampaignColumn::OpenRate => self.open_rate().into(),
            CampaignColumn::ConversionRate => self.conversion_rate().into(),
        }
    }
}

impl Sortable for Holding {
    type Column = ShareholderColumn;

    #[allow(clippy::cast_precision_loss)]
    fn sort_value(&self, column: ShareholderColumn) -> SortValue<'_> {
        let s = &self.shareholder;
        match column {
            ShareholderColumn::Name => s.name.as_str().into(),
            ShareholderColumn::Email => s.email.as_str().into(),
            ShareholderColumn::SharesHeld => (s.shares_held as f64).into(),
            ShareholderColumn::Ownership => self.ownership_pct.into(),
            ShareholderColumn::EquityType => s.equity_type.to_string().into(),
            ShareholderColumn::JoinDate => s.join_date.into(),
        }
    }
}
