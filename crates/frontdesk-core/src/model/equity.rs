// ── Cap table: equity classes and shareholders ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::{EntityId, Identified};

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
pub enum EquityType {
    #[default]
    Common,
    Preferred,
    Options,
    Warrants,
    #[serde(rename = "Convertible Note")]
    #[strum(to_string = "Convertible Note", serialize = "convertible")]
    ConvertibleNote,
}

/// A class of shares the company has authorized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityClass {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub equity_type: EquityType,
    pub authorized_shares: u64,
    #[serde(default)]
    pub issued_shares: u64,
    #[serde(default)]
    pub price_per_share: f64,
}

impl EquityClass {
    pub fn available_shares(&self) -> u64 {
        self.authorized_shares.saturating_sub(self.issued_shares)
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn issued_pct(&self) -> f64 {
        if self.authorized_shares == 0 {
            0.0
        } else {
            self.issued_shares as f64 / self.authorized_shares as f64 * 100.0
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn issued_value(&self) -> f64 {
        self.issued_shares as f64 * self.price_per_share
    }
}

impl Identified for EquityClass {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shareholder {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub shares_held: u64,
    #[serde(default)]
    pub equity_type: EquityType,
    pub join_date: NaiveDate,
}

impl Identified for Shareholder {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// A shareholder paired with their share of the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    #[serde(flatten)]
    pub shareholder: Shareholder,
    pub ownership_pct: f64,
}

/// Ownership computed over a set of shareholders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapTable {
    pub total_shares: u64,
    pub holdings: Vec<Holding>,
}

impl CapTable {
    #[allow(clippy::cast_precision_loss)]
    pub fn from_shareholders<'a>(shareholders: impl IntoIterator<Item = &'a Shareholder>) -> Self {
        let shareholders: Vec<&Shareholder> = shareholders.into_iter().collect();
        let total_shares: u64 = shareholders.iter().map(|s| s.shares_held).sum();
        let holdings = shareholders
            .into_iter()
            .map(|s| Holding {
                shareholder: s.clone(),
                ownership_pct: if total_shares == 0 {
                    0.0
                } else {
                    s.shares_held as f64 / total_shares as f64 * 100.0
                },
            })
            .collect();
        Self {
            total_shares,
            holdings,
        }
    }

    pub fn ownership_of(&self, id: &EntityId) -> Option<f64> {
        self.holdings
            .iter()
            .find(|h| &h.shareholder.id == id)
            .map(|h| h.ownership_pct)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn holder(id: &str, shares: u64) -> Shareholder {
        Shareholder {
            id: EntityId::from(id),
            name: format!("Holder {id}"),
            email: format!("{id}@example.com"),
            shares_held: shares,
            equity_type: EquityType::Common,
            join_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    #[test]
    fn ownership_sums_to_one_hundred() {
        let holders = [holder("a", 600), holder("b", 300), holder("c", 100)];
        let table = CapTable::from_shareholders(&holders);
        assert_eq!(table.total_shares, 1_000);
        assert!((table.ownership_of(&EntityId::from("a")).unwrap() - 60.0).abs() < 1e-9);
        let sum: f64 = table.holdings.iter().map(|h| h.ownership_pct).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_table_has_zero_ownership() {
        let holders = [holder("a", 0)];
        let table = CapTable::from_shareholders(&holders);
        assert_eq!(table.ownership_of(&EntityId::from("a")), Some(0.0));
    }

    #[test]
    fn class_availability_saturates() {
        let class = EquityClass {
            id: EntityId::from("EQ-1"),
            name: "Series A Preferred".into(),
            equity_type: EquityType::Preferred,
            authorized_shares: 1_000,
            issued_shares: 1_200,
            price_per_share: 2.5,
        };
        assert_eq!(class.available_shares(), 0);
        assert!((class.issued_pct() - 120.0).abs() < 1e-9);
        assert!((class.issued_value() - 3_000.0).abs() < 1e-9);
    }
}
