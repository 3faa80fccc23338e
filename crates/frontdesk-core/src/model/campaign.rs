// ── Marketing campaigns ──

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
pub enum CampaignChannel {
    #[default]
    Email,
    #[serde(rename = "SMS")]
    #[strum(to_string = "SMS")]
    Sms,
    Social,
    #[serde(rename = "Display")]
    #[strum(to_string = "Display", serialize = "display-ads")]
    DisplayAds,
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
pub enum CampaignStatus {
    #[default]
    Draft,
    Scheduled,
    Active,
    Paused,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub channel: CampaignChannel,
    #[serde(default)]
    pub status: CampaignStatus,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub spent: f64,
    #[serde(default)]
    pub sent: u64,
    #[serde(default)]
    pub opened: u64,
    #[serde(default)]
    pub clicked: u64,
    #[serde(default)]
    pub conversions: u64,
}

#[allow(clippy::cast_precision_loss)]
fn pct(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64 * 100.0
    }
}

impl Campaign {
    pub fn open_rate(&self) -> f64 {
        pct(self.opened, self.sent)
    }

    pub fn click_rate(&self) -> f64 {
        pct(self.clicked, self.sent)
    }

    pub fn conversion_rate(&self) -> f64 {
        pct(self.conversions, self.sent)
    }

    pub fn budget_utilization(&self) -> f64 {
        if self.budget > 0.0 {
            self.spent / self.budget * 100.0
        } else {
            0.0
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.budget > 0.0 && self.spent > self.budget
    }
}

impl Identified for Campaign {
    fn id(&self) -> &EntityId {
        &self.id
    }
}
