// ── Guest domain type ──

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
pub enum GuestStatus {
    #[default]
    Reserved,
    #[serde(rename = "Checked In")]
    #[strum(to_string = "Checked In", serialize = "checked-in", serialize = "checked_in")]
    CheckedIn,
    #[serde(rename = "Checked Out")]
    #[strum(to_string = "Checked Out", serialize = "checked-out", serialize = "checked_out")]
    CheckedOut,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub room_number: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default)]
    pub status: GuestStatus,
    #[serde(default)]
    pub vip: bool,
    #[serde(default)]
    pub total_spent: f64,
}

impl Guest {
    /// Length of stay. A check-out before check-in counts as zero nights.
    pub fn nights(&self) -> u32 {
        let days = (self.check_out - self.check_in).num_days().max(0);
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    pub fn is_in_house(&self) -> bool {
        self.status == GuestStatus::CheckedIn
    }

    pub fn arrives_on(&self, date: NaiveDate) -> bool {
        self.check_in == date && self.status == GuestStatus::Reserved
    }

    pub fn departs_on(&self, date: NaiveDate) -> bool {
        self.check_out == date && self.status == GuestStatus::CheckedIn
    }
}

impl Identified for Guest {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn guest(check_in: NaiveDate, check_out: NaiveDate) -> Guest {
        Guest {
            id: EntityId::from("GST-1"),
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            phone: String::new(),
            room_number: Some("305".into()),
            check_in,
            check_out,
            status: GuestStatus::Reserved,
            vip: false,
            total_spent: 0.0,
        }
    }

    #[test]
    fn nights_counts_calendar_days() {
        let g = guest(
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
        );
        assert_eq!(g.nights(), 3);
    }

    #[test]
    fn inverted_stay_has_zero_nights() {
        let g = guest(
            NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
        );
        assert_eq!(g.nights(), 0);
    }

    #[test]
    fn status_parses_kebab_case() {
        assert_eq!(
            "checked-in".parse::<GuestStatus>().unwrap(),
            GuestStatus::CheckedIn
        );
    }
}
