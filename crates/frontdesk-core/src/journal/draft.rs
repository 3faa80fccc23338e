// ── Journal entry drafts ──
//
// The editable form state behind "New journal entry". A draft becomes a
// stored `JournalEntry` only through `Desk::submit_journal_entry`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::balance::{BalanceCheck, BalanceRules, can_submit, validate};
use crate::error::CoreError;
use crate::model::{EntityId, JournalEntry, JournalLine, LineType};
use crate::validation::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalDraft {
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub lines: Vec<JournalLine>,
}

impl Default for JournalDraft {
    /// A fresh form: one blank debit and one blank credit.
    fn default() -> Self {
        Self {
            reference: String::new(),
            date: None,
            description: String::new(),
            lines: vec![
                JournalLine::default(),
                JournalLine {
                    line_type: LineType::Credit,
                    ..JournalLine::default()
                },
            ],
        }
    }
}

impl JournalDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a blank debit line; returns its index.
    pub fn add_line(&mut self) -> usize {
        self.lines.push(JournalLine::default());
        self.lines.len() - 1
    }

    /// Remove line `index`, refusing to drop below `min_lines`.
    pub fn remove_line(&mut self, index: usize, min_lines: usize) -> Result<JournalLine, CoreError> {
        if self.lines.len() <= min_lines {
            return Err(CoreError::MinimumLines { minimum: min_lines });
        }
        if index >= self.lines.len() {
            return Err(CoreError::not_found("Journal line", index + 1));
        }
        Ok(self.lines.remove(index))
    }

    /// Preview as an unposted entry, for balance checks and validation.
    pub fn to_entry(&self, id: EntityId) -> JournalEntry {
        JournalEntry {
            id,
            reference: self.reference.trim().to_owned(),
            date: self.date,
            description: self.description.clone(),
            lines: self.lines.clone(),
            posted: false,
        }
    }

    pub fn balance(&self, tolerance: f64) -> BalanceCheck {
        BalanceCheck::of(&self.preview(), tolerance)
    }

    pub fn validate(&self, rules: &BalanceRules) -> ValidationErrors {
        validate(&self.preview(), rules)
    }

    pub fn can_submit(&self, rules: &BalanceRules) -> bool {
        can_submit(&self.preview(), rules)
    }

    fn preview(&self) -> JournalEntry {
        self.to_entry(EntityId::Code(String::new()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::journal::MIN_JOURNAL_LINES;

    #[test]
    fn new_draft_has_a_debit_and_a_credit() {
        let draft = JournalDraft::new();
        assert_eq!(draft.lines.len(), 2);
        assert_eq!(draft.lines[0].line_type, LineType::Debit);
        assert_eq!(draft.lines[1].line_type, LineType::Credit);
        assert!(!draft.can_submit(&BalanceRules::default()));
    }

    #[test]
    fn add_line_appends_blank_debit() {
        let mut draft = JournalDraft::new();
        let index = draft.add_line();
        assert_eq!(index, 2);
        assert_eq!(draft.lines[2], JournalLine::default());
        assert_eq!(draft.lines[2].line_type, LineType::Debit);
    }

    #[test]
    fn remove_line_stops_at_minimum() {
        let mut draft = JournalDraft::new();
        let err = draft.remove_line(0, MIN_JOURNAL_LINES).unwrap_err();
        assert!(matches!(err, CoreError::MinimumLines { minimum: 2 }));
        assert_eq!(draft.lines.len(), 2);

        draft.add_line();
        draft.remove_line(0, MIN_JOURNAL_LINES).unwrap();
        assert_eq!(draft.lines.len(), 2);
    }

    #[test]
    fn remove_line_out_of_range() {
        let mut draft = JournalDraft::new();
        draft.add_line();
        assert!(matches!(
            draft.remove_line(7, MIN_JOURNAL_LINES),
            Err(CoreError::NotFound { .. })
        ));
    }
}
