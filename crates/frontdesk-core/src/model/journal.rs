// ── General ledger journal entries ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::entity_id::{EntityId, Identified};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum LineType {
    #[default]
    Debit,
    Credit,
}

/// One leg of a double-entry posting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalLine {
    #[serde(default)]
    pub account_code: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(rename = "type", default)]
    pub line_type: LineType,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
}

impl JournalLine {
    pub fn has_account(&self) -> bool {
        !self.account_code.trim().is_empty()
    }

    /// Label used in reports: "4000 Room Revenue".
    pub fn account_label(&self) -> String {
        if self.account_name.is_empty() {
            self.account_code.clone()
        } else {
            format!("{} {}", self.account_code, self.account_name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: EntityId,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub lines: Vec<JournalLine>,
    #[serde(default)]
    pub posted: bool,
}

impl JournalEntry {
    pub fn total_of(&self, line_type: LineType) -> f64 {
        self.lines
            .iter()
            .filter(|l| l.line_type == line_type)
            .map(|l| l.amount)
            .sum()
    }

    pub fn total_debits(&self) -> f64 {
        self.total_of(LineType::Debit)
    }

    pub fn total_credits(&self) -> f64 {
        self.total_of(LineType::Credit)
    }
}

impl Identified for JournalEntry {
    fn id(&self) -> &EntityId {
        &self.id
    }
}
