// ── Sales leads (group bookings, corporate accounts, events) ──

use chrono::{DateTime, Utc};
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
pub enum LeadSource {
    #[default]
    Website,
    Referral,
    #[serde(rename = "Walk-in")]
    #[strum(to_string = "Walk-in", serialize = "walkin")]
    WalkIn,
    Phone,
    Email,
    Event,
    Other,
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
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl LeadStatus {
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub source: LeadSource,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub estimated_value: f64,
    #[serde(default)]
    pub probability_pct: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub owner_id: Option<EntityId>,
}

impl Lead {
    /// Estimated value discounted by close probability.
    pub fn weighted_value(&self) -> f64 {
        self.estimated_value * self.probability_pct.clamp(0.0, 100.0) / 100.0
    }
}

impl Identified for Lead {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Roll-up of the sales pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSummary {
    pub open_leads: usize,
    pub won: usize,
    pub lost: usize,
    pub open_value: f64,
    pub weighted_value: f64,
    pub won_value: f64,
    /// Won over closed (won + lost), in percent.
    pub win_rate_pct: f64,
}

impl PipelineSummary {
    #[allow(clippy::cast_precision_loss)]
    pub fn from_leads<'a>(leads: impl IntoIterator<Item = &'a Lead>) -> Self {
        let mut summary = Self::default();
        for lead in leads {
            match lead.status {
                LeadStatus::Won => {
                    summary.won += 1;
                    summary.won_value += lead.estimated_value;
                }
                LeadStatus::Lost => summary.lost += 1,
                _ => {
                    summary.open_leads += 1;
                    summary.open_value += lead.estimated_value;
                    summary.weighted_value += lead.weighted_value();
                }
            }
        }
        let closed = summary.won + summary.lost;
        if closed > 0 {
            summary.win_rate_pct = summary.won as f64 / closed as f64 * 100.0;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn lead(id: &str, status: LeadStatus, value: f64, probability_pct: f64) -> Lead {
        Lead {
            id: EntityId::from(id),
            name: format!("Lead {id}"),
            company: "Globex".into(),
            email: String::new(),
            phone: String::new(),
            source: LeadSource::Referral,
            status,
            estimated_value: value,
            probability_pct,
            created_at: Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).single().unwrap_or_default(),
            owner_id: None,
        }
    }

    #[test]
    fn weighted_value_uses_probability() {
        let l = lead("L1", LeadStatus::Proposal, 10_000.0, 25.0);
        assert!((l.weighted_value() - 2_500.0).abs() < 1e-9);
    }

    #[test]
    fn pipeline_separates_open_and_closed() {
        let leads = [
            lead("L1", LeadStatus::Qualified, 1_000.0, 50.0),
            lead("L2", LeadStatus::Won, 4_000.0, 100.0),
            lead("L3", LeadStatus::Lost, 2_000.0, 0.0),
            lead("L4", LeadStatus::Won, 1_000.0, 100.0),
        ];
        let summary = PipelineSummary::from_leads(&leads);
        assert_eq!(summary.open_leads, 1);
        assert!((summary.open_value - 1_000.0).abs() < 1e-9);
        assert!((summary.weighted_value - 500.0).abs() < 1e-9);
        assert!((summary.won_value - 5_000.0).abs() < 1e-9);
        assert!((summary.win_rate_pct - 200.0 / 3.0).abs() < 1e-9);
    }
}
