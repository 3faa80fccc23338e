// ── Trial balance ──

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{JournalEntry, LineType};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceRow {
    pub account_code: String,
    pub account_name: String,
    pub debits: f64,
    pub credits: f64,
}

impl TrialBalanceRow {
    /// Debit-positive net movement.
    pub fn net(&self) -> f64 {
        self.debits - self.credits
    }
}

/// Per-account totals over posted entries, ordered by account code.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalance {
    pub rows: Vec<TrialBalanceRow>,
    pub total_debits: f64,
    pub total_credits: f64,
}

impl TrialBalance {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a JournalEntry>) -> Self {
        let mut accounts: BTreeMap<String, TrialBalanceRow> = BTreeMap::new();
        for entry in entries.into_iter().filter(|e| e.posted) {
            for line in &entry.lines {
                let row = accounts
                    .entry(line.account_code.clone())
                    .or_insert_with(|| TrialBalanceRow {
                        account_code: line.account_code.clone(),
                        ..TrialBalanceRow::default()
                    });
                if row.account_name.is_empty() {
                    row.account_name.clone_from(&line.account_name);
                }
                match line.line_type {
                    LineType::Debit => row.debits += line.amount,
                    LineType::Credit => row.credits += line.amount,
                }
            }
        }
        let rows: Vec<TrialBalanceRow> = accounts.into_values().collect();
        Self {
            total_debits: rows.iter().map(|r| r.debits).sum(),
            total_credits: rows.iter().map(|r| r.credits).sum(),
            rows,
        }
    }

    pub fn is_balanced(&self, tolerance: f64) -> bool {
        (self.total_debits - self.total_credits).abs() <= tolerance
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{EntityId, JournalLine};

    fn entry(posted: bool, amount: f64) -> JournalEntry {
        JournalEntry {
            id: EntityId::generate(),
            reference: "JE".into(),
            date: None,
            description: String::new(),
            lines: vec![
                JournalLine {
                    account_code: "4000".into(),
                    account_name: "Room Revenue".into(),
                    line_type: LineType::Credit,
                    amount,
                    description: String::new(),
                },
                JournalLine {
                    account_code: "1000".into(),
                    account_name: "Cash".into(),
                    line_type: LineType::Debit,
                    amount,
                    description: String::new(),
                },
            ],
            posted,
        }
    }

    #[test]
    fn only_posted_entries_count() {
        let entries = [entry(true, 120.0), entry(false, 999.0), entry(true, 30.0)];
        let tb = TrialBalance::from_entries(&entries);

        assert_eq!(tb.rows.len(), 2);
        assert_eq!(tb.rows[0].account_code, "1000");
        assert_eq!(tb.rows[0].account_name, "Cash");
        assert!((tb.rows[0].net() - 150.0).abs() < 1e-9);
        assert!((tb.rows[1].net() + 150.0).abs() < 1e-9);
        assert!(tb.is_balanced(0.01));
    }
}
