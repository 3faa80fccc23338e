// ── Journal, payments and bank reconciliation ──

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::Desk;
use crate::command::NewPayment;
use crate::config::RECONCILE_AMOUNT_TOLERANCE;
use crate::error::CoreError;
use crate::journal::{BalanceCheck, JournalDraft, TrialBalance, validate};
use crate::model::invoice::SETTLED_EPSILON;
use crate::model::{
    AgingReport, BankTransaction, EntityId, Invoice, InvoiceStatus, JournalEntry, LedgerSide,
    Payment,
};
use crate::validation::ValidationErrors;
use crate::view::{self, InvoiceColumn, InvoiceFilter, Page, TableState};

impl Desk {
    /// Look up a journal entry by id or by reference number.
    pub fn find_journal_entry(&self, key: &str) -> Option<Arc<JournalEntry>> {
        self.store
            .journal_entry_by_id(&EntityId::from(key))
            .or_else(|| self.store.journal_entry_by_reference(key))
    }

    /// Look up an invoice by id or by invoice number.
    pub fn find_invoice(&self, key: &str) -> Option<Arc<Invoice>> {
        self.store
            .invoice_by_id(&EntityId::from(key))
            .or_else(|| self.store.invoice_by_number(key))
    }

    // ── Journal ──────────────────────────────────────────────────────

    /// Validate a draft and store it as an unposted entry.
    pub fn submit_journal_entry(&mut self, draft: &JournalDraft) -> Result<JournalEntry, CoreError> {
        let entry = draft.to_entry(EntityId::generate());
        let mut errors = validate(&entry, &self.config.balance_rules());
        if !entry.reference.is_empty()
            && self
                .store
                .journal_entry_by_reference(&entry.reference)
                .is_some()
        {
            errors.add(
                "reference",
                format!("Reference {} is already in use", entry.reference),
            );
        }
        if !errors.is_empty() {
            warn!(reference = %entry.reference, problems = errors.len(), "journal entry rejected");
            return Err(errors.into());
        }

        self.store.journal_entries.upsert(entry.clone());
        info!(reference = %entry.reference, lines = entry.lines.len(), "journal entry submitted");
        Ok(entry)
    }

    /// Mark a stored entry posted, re-checking it first.
    pub fn post_journal_entry(&mut self, id: &EntityId) -> Result<JournalEntry, CoreError> {
        let entry = self
            .store
            .journal_entry_by_id(id)
            .ok_or_else(|| CoreError::not_found("Journal entry", id))?;
        if entry.posted {
            return Err(CoreError::AlreadyPosted {
                reference: entry.reference.clone(),
            });
        }

        let check = BalanceCheck::of(&entry, self.config.balance_tolerance);
        if !check.balanced {
            warn!(reference = %entry.reference, "posting rejected: unbalanced");
            return Err(CoreError::Unbalanced {
                debits: check.total_debits,
                credits: check.total_credits,
            });
        }
        validate(&entry, &self.config.balance_rules()).into_result()?;

        let posted = self
            .store
            .journal_entries
            .update(id, |e| {
                e.posted = true;
                e.clone()
            })
            .ok_or_else(|| CoreError::not_found("Journal entry", id))?;
        info!(reference = %posted.reference, "journal entry posted");
        Ok(posted)
    }

    pub fn trial_balance(&self) -> TrialBalance {
        TrialBalance::from_entries(self.store.journal_entries_snapshot().iter().map(AsRef::as_ref))
    }

    // ── Invoices ─────────────────────────────────────────────────────

    pub fn aging(&self, side: LedgerSide) -> AgingReport {
        AgingReport::from_invoices(
            self.store.invoices_snapshot().iter().map(AsRef::as_ref),
            side,
            self.clock.today(),
        )
    }

    pub fn invoices_page(
        &self,
        filter: &InvoiceFilter,
        table: &TableState<InvoiceColumn>,
    ) -> Page<Arc<Invoice>> {
        let snapshot = self.store.invoices_snapshot();
        view::build_page(snapshot.as_slice(), |i| filter.matches(i), table)
    }

    // ── Payments ─────────────────────────────────────────────────────

    /// Store a payment and apply it to its invoice, if any.
    pub fn record_payment(&mut self, data: NewPayment) -> Result<Payment, CoreError> {
        data.validate().into_result()?;
        let id = data.id.unwrap_or_else(EntityId::generate);
        if self.store.payments.contains(&id) {
            let mut errors = ValidationErrors::new();
            errors.add("id", format!("A payment with id {id} already exists"));
            return Err(errors.into());
        }

        if let Some(invoice_id) = &data.invoice_id {
            let invoice = self
                .store
                .invoice_by_id(invoice_id)
                .ok_or_else(|| CoreError::not_found("Invoice", invoice_id))?;
            if invoice.status == InvoiceStatus::Void {
                let mut errors = ValidationErrors::new();
                errors.add(
                    "invoiceId",
                    format!("Invoice {} is void", invoice.number),
                );
                return Err(errors.into());
            }
            self.store.invoices.update(invoice_id, |i| {
                i.amount_paid += data.amount;
                i.status = if i.balance_due() <= SETTLED_EPSILON {
                    InvoiceStatus::Paid
                } else {
                    InvoiceStatus::PartiallyPaid
                };
            });
        }

        let payment = Payment {
            id,
            invoice_id: data.invoice_id,
            date: data.date,
            amount: data.amount,
            method: data.method,
            reference: data.reference,
        };
        self.store.payments.upsert(payment.clone());
        info!(payment = %payment.id, amount = payment.amount, "payment recorded");
        Ok(payment)
    }

    // ── Bank reconciliation ──────────────────────────────────────────

    fn reconciled_payment_ids(&self) -> HashSet<EntityId> {
        self.store
            .bank_transactions_snapshot()
            .iter()
            .filter_map(|t| t.reconciled_payment_id.clone())
            .collect()
    }

    pub fn unreconciled_transactions(&self) -> Vec<Arc<BankTransaction>> {
        self.store
            .bank_transactions_snapshot()
            .iter()
            .filter(|t| !t.is_reconciled())
            .cloned()
            .collect()
    }

    /// Unmatched payments whose amount equals the transaction's (within a
    /// cent) and whose date falls inside the window, nearest date first.
    pub fn reconciliation_candidates(
        &self,
        transaction_id: &EntityId,
    ) -> Result<Vec<Arc<Payment>>, CoreError> {
        let txn = self
            .store
            .bank_transaction_by_id(transaction_id)
            .ok_or_else(|| CoreError::not_found("Bank transaction", transaction_id))?;
        let taken = self.reconciled_payment_ids();
        let window = self.config.reconcile_window_days;

        let mut candidates: Vec<(i64, Arc<Payment>)> = self
            .store
            .payments_snapshot()
            .iter()
            .filter(|p| !taken.contains(&p.id))
            .filter(|p| amounts_match(p.amount, txn.amount))
            .filter_map(|p| {
                let gap = (p.date - txn.date).num_days().abs();
                (gap <= window).then(|| (gap, Arc::clone(p)))
            })
            .collect();
        candidates.sort_by(|(a_gap, a), (b_gap, b)| a_gap.cmp(b_gap).then(a.date.cmp(&b.date)));
        Ok(candidates.into_iter().map(|(_, p)| p).collect())
    }

    /// Link a bank transaction to the payment it settles.
    pub fn reconcile(
        &mut self,
        transaction_id: &EntityId,
        payment_id: &EntityId,
    ) -> Result<BankTransaction, CoreError> {
        let txn = self
            .store
            .bank_transaction_by_id(transaction_id)
            .ok_or_else(|| CoreError::not_found("Bank transaction", transaction_id))?;
        let payment = self
            .store
            .payment_by_id(payment_id)
            .ok_or_else(|| CoreError::not_found("Payment", payment_id))?;

        if let Some(existing) = &txn.reconciled_payment_id {
            return Err(CoreError::Reconciliation {
                message: format!("transaction {transaction_id} is already matched to payment {existing}"),
            });
        }
        if self.reconciled_payment_ids().contains(payment_id) {
            return Err(CoreError::Reconciliation {
                message: format!("payment {payment_id} is already matched to another transaction"),
            });
        }
        if !amounts_match(payment.amount, txn.amount) {
            return Err(CoreError::Reconciliation {
                message: format!(
                    "amounts differ: transaction {:.2}, payment {:.2}",
                    txn.amount.abs(),
                    payment.amount
                ),
            });
        }

        let updated = self
            .store
            .bank_transactions
            .update(transaction_id, |t| {
                t.reconciled_payment_id = Some(payment_id.clone());
                t.clone()
            })
            .ok_or_else(|| CoreError::not_found("Bank transaction", transaction_id))?;
        debug!(transaction = %transaction_id, payment = %payment_id, "reconciled");
        Ok(updated)
    }
}

/// Outflows appear negative on the statement, so compare magnitudes.
fn amounts_match(payment: f64, transaction: f64) -> bool {
    (payment - transaction.abs()).abs() <= RECONCILE_AMOUNT_TOLERANCE + 1e-9
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::super::test_support::desk_with;
    use super::*;
    use crate::model::{InvoiceItem, JournalLine, LineType, PaymentMethod};
    use crate::store::Dataset;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn draft(reference: &str, debit: f64, credit: f64) -> JournalDraft {
        let mut d = JournalDraft::new();
        d.reference = reference.into();
        d.date = Some(day(15));
        d.lines[0] = JournalLine {
            account_code: "1000".into(),
            account_name: "Cash".into(),
            line_type: LineType::Debit,
            amount: debit,
            description: String::new(),
        };
        d.lines[1] = JournalLine {
            account_code: "4000".into(),
            account_name: "Room Revenue".into(),
            line_type: LineType::Credit,
            amount: credit,
            description: String::new(),
        };
        d
    }

    fn payment(id: &str, date: NaiveDate, amount: f64) -> Payment {
        Payment {
            id: EntityId::from(id),
            invoice_id: None,
            date,
            amount,
            method: PaymentMethod::BankTransfer,
            reference: id.into(),
        }
    }

    fn txn(id: &str, date: NaiveDate, amount: f64) -> BankTransaction {
        BankTransaction {
            id: EntityId::from(id),
            date,
            description: format!("Statement {id}"),
            amount,
            reconciled_payment_id: None,
        }
    }

    fn invoice(id: &str, unit_price: f64) -> Invoice {
        Invoice {
            id: EntityId::from(id),
            number: format!("INV-{id}"),
            side: LedgerSide::Receivable,
            counterparty: "Acme Travel".into(),
            issue_date: day(1),
            due_date: day(10),
            items: vec![InvoiceItem {
                description: "Group block".into(),
                quantity: 1.0,
                unit_price,
            }],
            tax_rate_pct: 0.0,
            amount_paid: 0.0,
            status: InvoiceStatus::Sent,
        }
    }

    #[test]
    fn submit_then_post_feeds_trial_balance() {
        let (mut desk, _clock) = desk_with(Dataset::default());
        let entry = desk.submit_journal_entry(&draft("JE-1", 250.0, 250.0)).unwrap();
        assert!(!entry.posted);
        assert!(desk.trial_balance().rows.is_empty());
        let mut journal = desk.store().subscribe_journal_entries();

        desk.post_journal_entry(&entry.id).unwrap();
        assert!(journal.has_changed());
        assert!(journal.latest()[0].posted);
        assert!(!journal.current()[0].posted);
        let tb = desk.trial_balance();
        assert_eq!(tb.rows.len(), 2);
        assert!(tb.is_balanced(0.01));

        assert!(matches!(
            desk.post_journal_entry(&entry.id),
            Err(CoreError::AlreadyPosted { .. })
        ));
        assert!(desk.find_journal_entry("je-1").is_some());
    }

    #[test]
    fn unbalanced_draft_is_not_stored() {
        let (mut desk, _clock) = desk_with(Dataset::default());
        let err = desk
            .submit_journal_entry(&draft("JE-2", 100.0, 90.0))
            .unwrap_err();
        let CoreError::Validation(errors) = err else {
            panic!("expected validation errors");
        };
        let message = errors.get("balance").unwrap();
        assert!(message.contains("100.00") && message.contains("90.00"));
        assert!(desk.store().journal_entries_snapshot().is_empty());
    }

    #[test]
    fn duplicate_reference_is_rejected() {
        let (mut desk, _clock) = desk_with(Dataset::default());
        desk.submit_journal_entry(&draft("JE-3", 10.0, 10.0)).unwrap();
        assert!(desk.submit_journal_entry(&draft("JE-3", 10.0, 10.0)).is_err());
    }

    #[test]
    fn seeded_unbalanced_entry_cannot_be_posted() {
        let entry = draft("JE-4", 100.0, 90.0).to_entry(EntityId::from("JE-4"));
        let (mut desk, _clock) = desk_with(Dataset {
            journal_entries: vec![entry],
            ..Dataset::default()
        });
        assert!(matches!(
            desk.post_journal_entry(&EntityId::from("JE-4")),
            Err(CoreError::Unbalanced { .. })
        ));
    }

    #[test]
    fn payments_settle_invoices() {
        let (mut desk, _clock) = desk_with(Dataset {
            invoices: vec![invoice("1", 500.0)],
            ..Dataset::default()
        });
        let mut data = NewPayment {
            id: None,
            invoice_id: Some(EntityId::from("1")),
            date: day(12),
            amount: 200.0,
            method: PaymentMethod::Card,
            reference: "POS-1".into(),
        };
        desk.record_payment(data.clone()).unwrap();
        assert_eq!(
            desk.find_invoice("INV-1").unwrap().status,
            InvoiceStatus::PartiallyPaid
        );

        data.amount = 300.0;
        desk.record_payment(data).unwrap();
        let inv = desk.find_invoice("1").unwrap();
        assert_eq!(inv.status, InvoiceStatus::Paid);
        assert!(inv.balance_due().abs() < 1e-9);
        assert_eq!(desk.store().payments_snapshot().len(), 2);
    }

    #[test]
    fn duplicate_payment_id_leaves_invoice_untouched() {
        let (mut desk, _clock) = desk_with(Dataset {
            invoices: vec![invoice("1", 100.0)],
            ..Dataset::default()
        });
        let mut data = NewPayment {
            id: Some(EntityId::from("PAY-1")),
            invoice_id: Some(EntityId::from("1")),
            date: day(12),
            amount: 40.0,
            method: PaymentMethod::Cash,
            reference: "DESK-1".into(),
        };
        desk.record_payment(data.clone()).unwrap();

        data.amount = 60.0;
        let err = desk.record_payment(data).unwrap_err();
        let CoreError::Validation(errors) = err else {
            panic!("expected validation errors");
        };
        assert!(errors.get("id").unwrap().contains("PAY-1"));

        let payments = desk.store().payments_snapshot();
        assert_eq!(payments.len(), 1);
        assert!((payments[0].amount - 40.0).abs() < 1e-9);
        let inv = desk.find_invoice("1").unwrap();
        assert!((inv.amount_paid - 40.0).abs() < 1e-9);
        assert_eq!(inv.status, InvoiceStatus::PartiallyPaid);
    }

    #[test]
    fn aging_buckets_open_receivables() {
        let (desk, _clock) = desk_with(Dataset {
            invoices: vec![invoice("1", 500.0)],
            ..Dataset::default()
        });
        let report = desk.aging(LedgerSide::Receivable);
        assert!((report.days_1_30 - 500.0).abs() < 1e-9);
        assert_eq!(report.open_invoices, 1);
        assert_eq!(desk.aging(LedgerSide::Payable).open_invoices, 0);
    }

    #[test]
    fn candidates_match_amount_and_window_nearest_first() {
        let (desk, _clock) = desk_with(Dataset {
            payments: vec![
                payment("P-far", day(1), 120.0),
                payment("P-two", day(12), 120.0),
                payment("P-one", day(9), 120.005),
                payment("P-odd", day(10), 119.0),
            ],
            bank_transactions: vec![txn("T-1", day(10), 120.0)],
            ..Dataset::default()
        });
        let ids: Vec<String> = desk
            .reconciliation_candidates(&EntityId::from("T-1"))
            .unwrap()
            .iter()
            .map(|p| p.id.to_string())
            .collect();
        assert_eq!(ids, vec!["P-one", "P-two"]);
    }

    #[test]
    fn reconcile_links_once() {
        let (mut desk, _clock) = desk_with(Dataset {
            payments: vec![payment("P-1", day(10), 75.5)],
            bank_transactions: vec![txn("T-1", day(11), -75.5), txn("T-2", day(11), 75.5)],
            ..Dataset::default()
        });
        let t = desk
            .reconcile(&EntityId::from("T-1"), &EntityId::from("P-1"))
            .unwrap();
        assert_eq!(t.reconciled_payment_id, Some(EntityId::from("P-1")));
        assert_eq!(desk.unreconciled_transactions().len(), 1);

        assert!(matches!(
            desk.reconcile(&EntityId::from("T-2"), &EntityId::from("P-1")),
            Err(CoreError::Reconciliation { .. })
        ));
        assert!(
            desk.reconciliation_candidates(&EntityId::from("T-2"))
                .unwrap()
                .is_empty()
        );
    }
}
