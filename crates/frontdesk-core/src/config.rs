// ── Runtime desk configuration ──
//
// Business-rule tuning for a `Desk`. Core never reads config files: the
// CLI builds a `DeskConfig` from frontdesk-config and hands it in.

use crate::journal::{BalanceRules, DEFAULT_BALANCE_TOLERANCE, MIN_JOURNAL_LINES};
use crate::model::DEFAULT_ASSIGNMENT_CAP;
use crate::view::PageSize;

/// Days either side of a bank transaction searched for matching payments.
pub const DEFAULT_RECONCILE_WINDOW_DAYS: i64 = 3;

/// Amount difference still treated as a reconciliation match.
pub const RECONCILE_AMOUNT_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeskConfig {
    /// Unavailable staff stay assignable while below this many assignments.
    pub assignment_cap: u32,
    /// Largest debit/credit gap a journal entry may carry.
    pub balance_tolerance: f64,
    pub min_journal_lines: usize,
    pub reconcile_window_days: i64,
    pub default_page_size: PageSize,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            assignment_cap: DEFAULT_ASSIGNMENT_CAP,
            balance_tolerance: DEFAULT_BALANCE_TOLERANCE,
            min_journal_lines: MIN_JOURNAL_LINES,
            reconcile_window_days: DEFAULT_RECONCILE_WINDOW_DAYS,
            default_page_size: PageSize::default(),
        }
    }
}

impl DeskConfig {
    pub fn balance_rules(&self) -> BalanceRules {
        BalanceRules {
            min_lines: self.min_journal_lines,
            tolerance: self.balance_tolerance,
        }
    }
}
