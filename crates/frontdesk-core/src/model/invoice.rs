// ── Invoices (AR) and supplier bills (AP) ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::{EntityId, Identified};

/// Amounts below half a cent are treated as settled.
pub(crate) const SETTLED_EPSILON: f64 = 0.005;

/// Which side of the ledger an invoice sits on.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum LedgerSide {
    /// Accounts receivable: we billed a guest or corporate client.
    #[default]
    #[strum(to_string = "Receivable", serialize = "ar")]
    Receivable,
    /// Accounts payable: a supplier billed us.
    #[strum(to_string = "Payable", serialize = "ap")]
    Payable,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    #[serde(rename = "Partially Paid")]
    #[strum(to_string = "Partially Paid", serialize = "partially-paid", serialize = "partial")]
    PartiallyPaid,
    Paid,
    Overdue,
    Void,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub description: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    pub unit_price: f64,
}

fn default_quantity() -> f64 {
    1.0
}

impl InvoiceItem {
    pub fn amount(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: EntityId,
    pub number: String,
    #[serde(default)]
    pub side: LedgerSide,
    /// Guest, company or supplier name.
    pub counterparty: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    #[serde(default)]
    pub tax_rate_pct: f64,
    #[serde(default)]
    pub amount_paid: f64,
    #[serde(default)]
    pub status: InvoiceStatus,
}

impl Invoice {
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(InvoiceItem::amount).sum()
    }

    pub fn tax(&self) -> f64 {
        self.subtotal() * self.tax_rate_pct / 100.0
    }

    pub fn total(&self) -> f64 {
        self.subtotal() + self.tax()
    }

    pub fn balance_due(&self) -> f64 {
        (self.total() - self.amount_paid).max(0.0)
    }

    /// Issued and not fully settled.
    pub fn is_open(&self) -> bool {
        !matches!(self.status, InvoiceStatus::Draft | InvoiceStatus::Void)
            && self.balance_due() > SETTLED_EPSILON
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_open() && self.due_date < today
    }

    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        if self.is_overdue(today) {
            (today - self.due_date).num_days()
        } else {
            0
        }
    }

    /// Status as it should read today: an unpaid invoice past its due date is Overdue.
    pub fn effective_status(&self, today: NaiveDate) -> InvoiceStatus {
        if self.is_overdue(today) {
            InvoiceStatus::Overdue
        } else {
            self.status
        }
    }
}

impl Identified for Invoice {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

// ── Aging ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum AgingBucket {
    Current,
    #[strum(to_string = "1-30")]
    Days1To30,
    #[strum(to_string = "31-60")]
    Days31To60,
    #[strum(to_string = "61-90")]
    Days61To90,
    #[strum(to_string = "90+")]
    Over90,
}

impl AgingBucket {
    pub fn for_days_overdue(days: i64) -> Self {
        match days {
            i64::MIN..=0 => Self::Current,
            1..=30 => Self::Days1To30,
            31..=60 => Self::Days31To60,
            61..=90 => Self::Days61To90,
            _ => Self::Over90,
        }
    }
}

/// Outstanding balances for one ledger side, bucketed by days past due.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgingReport {
    pub side: LedgerSide,
    pub current: f64,
    pub days_1_30: f64,
    pub days_31_60: f64,
    pub days_61_90: f64,
    pub over_90: f64,
    pub total: f64,
    pub open_invoices: usize,
}

impl AgingReport {
    pub fn from_invoices<'a>(
        invoices: impl IntoIterator<Item = &'a Invoice>,
        side: LedgerSide,
        today: NaiveDate,
    ) -> Self {
        let mut report = Self {
            side,
            ..Self::default()
        };
        for invoice in invoices {
            if invoice.side != side || !invoice.is_open() {
                continue;
            }
            let balance = invoice.balance_due();
            let slot = match AgingBucket::for_days_overdue(invoice.days_overdue(today)) {
                AgingBucket::Current => &mut report.current,
                AgingBucket::Days1To30 => &mut report.days_1_30,
                AgingBucket::Days31To60 => &mut report.days_31_60,
                AgingBucket::Days61To90 => &mut report.days_61_90,
                AgingBucket::Over90 => &mut report.over_90,
            };
            *slot += balance;
            report.total += balance;
            report.open_invoices += 1;
        }
        report
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice(number: &str, side: LedgerSide, due: NaiveDate, paid: f64) -> Invoice {
        Invoice {
            id: EntityId::from(number),
            number: number.into(),
            side,
            counterparty: "Acme Travel".into(),
            issue_date: date(2026, 1, 1),
            due_date: due,
            items: vec![
                InvoiceItem {
                    description: "Deluxe room x2".into(),
                    quantity: 2.0,
                    unit_price: 150.0,
                },
                InvoiceItem {
                    description: "Breakfast".into(),
                    quantity: 1.0,
                    unit_price: 100.0,
                },
            ],
            tax_rate_pct: 10.0,
            amount_paid: paid,
            status: InvoiceStatus::Sent,
        }
    }

    #[test]
    fn totals_include_tax_and_payments() {
        let inv = invoice("INV-1", LedgerSide::Receivable, date(2026, 2, 1), 40.0);
        assert!((inv.subtotal() - 400.0).abs() < 1e-9);
        assert!((inv.tax() - 40.0).abs() < 1e-9);
        assert!((inv.total() - 440.0).abs() < 1e-9);
        assert!((inv.balance_due() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn fully_paid_invoice_is_never_overdue() {
        let inv = invoice("INV-2", LedgerSide::Receivable, date(2026, 1, 10), 440.0);
        assert!(!inv.is_open());
        assert!(!inv.is_overdue(date(2026, 6, 1)));
    }

    #[test]
    fn effective_status_flags_overdue() {
        let inv = invoice("INV-3", LedgerSide::Receivable, date(2026, 1, 10), 0.0);
        assert_eq!(inv.effective_status(date(2026, 1, 20)), InvoiceStatus::Overdue);
        assert_eq!(inv.days_overdue(date(2026, 1, 20)), 10);
        assert_eq!(inv.effective_status(date(2026, 1, 5)), InvoiceStatus::Sent);
    }

    #[test]
    fn aging_buckets_by_days_past_due() {
        let today = date(2026, 6, 30);
        let invoices = [
            invoice("A", LedgerSide::Receivable, date(2026, 7, 15), 0.0),
            invoice("B", LedgerSide::Receivable, date(2026, 6, 10), 0.0),
            invoice("C", LedgerSide::Receivable, date(2026, 3, 1), 0.0),
            invoice("D", LedgerSide::Payable, date(2026, 6, 10), 0.0),
        ];
        let report = AgingReport::from_invoices(&invoices, LedgerSide::Receivable, today);
        assert_eq!(report.open_invoices, 3);
        assert!((report.current - 440.0).abs() < 1e-9);
        assert!((report.days_1_30 - 440.0).abs() < 1e-9);
        assert!((report.over_90 - 440.0).abs() < 1e-9);
        assert!((report.total - 1320.0).abs() < 1e-9);
    }

    #[test]
    fn ledger_side_accepts_short_codes() {
        assert_eq!("ap".parse::<LedgerSide>().unwrap(), LedgerSide::Payable);
        assert_eq!("AR".parse::<LedgerSide>().unwrap(), LedgerSide::Receivable);
    }
}
