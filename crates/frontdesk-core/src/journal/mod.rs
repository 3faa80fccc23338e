// ── Journal entries: balancing, drafts, trial balance ──

pub mod balance;
pub mod draft;
pub mod trial;

pub use balance::{
    BalanceCheck, BalanceRules, DEFAULT_BALANCE_TOLERANCE, MIN_JOURNAL_LINES, can_submit, validate,
};
pub use draft::JournalDraft;
pub use trial::{TrialBalance, TrialBalanceRow};
