// ── Double-entry balance validation ──

use serde::Serialize;

use crate::model::JournalEntry;
use crate::validation::ValidationErrors;

/// Largest |debits - credits| still treated as balanced.
pub const DEFAULT_BALANCE_TOLERANCE: f64 = 0.01;

/// Fewest lines a journal entry may have.
pub const MIN_JOURNAL_LINES: usize = 2;

// Absorbs binary rounding so 0.01 apart still counts as within 0.01.
const FLOAT_SLACK: f64 = 1e-9;

/// Tunables for the balancer, normally taken from desk configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceRules {
    pub min_lines: usize,
    pub tolerance: f64,
}

impl Default for BalanceRules {
    fn default() -> Self {
        Self {
            min_lines: MIN_JOURNAL_LINES,
            tolerance: DEFAULT_BALANCE_TOLERANCE,
        }
    }
}

/// Debit / credit totals for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceCheck {
    pub total_debits: f64,
    pub total_credits: f64,
    pub difference: f64,
    pub balanced: bool,
}

impl BalanceCheck {
    pub fn of(entry: &JournalEntry, tolerance: f64) -> Self {
        let total_debits = entry.total_debits();
        let total_credits = entry.total_credits();
        let difference = total_debits - total_credits;
        Self {
            total_debits,
            total_credits,
            difference,
            balanced: difference.abs() <= tolerance + FLOAT_SLACK,
        }
    }

    pub fn message(&self) -> String {
        format!(
            "Debits ({:.2}) must equal credits ({:.2})",
            self.total_debits, self.total_credits
        )
    }
}

fn check_lines(entry: &JournalEntry, rules: &BalanceRules, errors: &mut ValidationErrors) {
    if entry.lines.len() < rules.min_lines {
        errors.add(
            "lines",
            format!("At least {} lines are required", rules.min_lines),
        );
    }
    for (i, line) in entry.lines.iter().enumerate() {
        if !line.has_account() {
            errors.add(format!("lines[{i}].account"), "Account is required");
        }
        if !(line.amount.is_finite() && line.amount > 0.0) {
            errors.add(
                format!("lines[{i}].amount"),
                "Amount must be greater than zero",
            );
        }
    }
    let check = BalanceCheck::of(entry, rules.tolerance);
    if !check.balanced {
        errors.add("balance", check.message());
    }
}

/// Every problem with `entry`, keyed by field path. Empty means valid.
pub fn validate(entry: &JournalEntry, rules: &BalanceRules) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if entry.reference.trim().is_empty() {
        errors.add("reference", "Reference number is required");
    }
    if entry.date.is_none() {
        errors.add("date", "Date is required");
    }
    check_lines(entry, rules, &mut errors);
    errors
}

/// Whether the submit control is enabled: enough lines, every line
/// complete, and debits equal credits within tolerance.
pub fn can_submit(entry: &JournalEntry, rules: &BalanceRules) -> bool {
    let mut errors = ValidationErrors::new();
    check_lines(entry, rules, &mut errors);
    errors.is_empty()
}
