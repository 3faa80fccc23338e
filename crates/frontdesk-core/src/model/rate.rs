// ── Room rate plans ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::{EntityId, Identified};
use super::room::RoomType;

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
pub enum RateStatus {
    #[default]
    Active,
    Inactive,
    Scheduled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    pub id: EntityId,
    pub name: String,
    pub room_type: RoomType,
    pub base_rate: f64,
    #[serde(default)]
    pub discount_pct: f64,
    #[serde(default = "default_min_nights")]
    pub min_nights: u32,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
    #[serde(default)]
    pub status: RateStatus,
}

fn default_min_nights() -> u32 {
    1
}

impl Rate {
    /// Nightly price after the plan discount.
    pub fn effective_rate(&self) -> f64 {
        let discount = self.discount_pct.clamp(0.0, 100.0);
        self.base_rate * (1.0 - discount / 100.0)
    }

    /// Active plan whose validity window (open-ended on either side) covers `date`.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.status == RateStatus::Active
            && self.valid_from.is_none_or(|from| from <= date)
            && self.valid_to.is_none_or(|to| date <= to)
    }
}

impl Identified for Rate {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rate() -> Rate {
        Rate {
            id: EntityId::from("RATE-BAR"),
            name: "Best Available".into(),
            room_type: RoomType::Suite,
            base_rate: 250.0,
            discount_pct: 20.0,
            min_nights: 1,
            valid_from: NaiveDate::from_ymd_opt(2026, 6, 1),
            valid_to: NaiveDate::from_ymd_opt(2026, 8, 31),
            status: RateStatus::Active,
        }
    }

    #[test]
    fn effective_rate_applies_discount() {
        assert!((rate().effective_rate() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn discount_is_clamped() {
        let mut r = rate();
        r.discount_pct = 150.0;
        assert!(r.effective_rate().abs() < 1e-9);
    }

    #[test]
    fn applies_within_window_only() {
        let r = rate();
        assert!(r.applies_on(NaiveDate::from_ymd_opt(2026, 7, 4).unwrap()));
        assert!(!r.applies_on(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()));
    }

    #[test]
    fn inactive_plan_never_applies() {
        let mut r = rate();
        r.status = RateStatus::Inactive;
        assert!(!r.applies_on(NaiveDate::from_ymd_opt(2026, 7, 4).unwrap()));
    }
}
