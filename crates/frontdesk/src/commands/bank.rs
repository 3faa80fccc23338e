//! Bank reconciliation handlers.

use std::sync::Arc;

use tabled::Tabled;

use frontdesk_core::{BankTransaction, Command as CoreCommand, CommandResult, EntityId, Payment};

use crate::cli::{BankArgs, BankCommand};
use crate::error::CliError;
use crate::output::{self, Tone, money};

use super::{Session, unexpected, util};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Matched payment")]
    matched: String,
}

fn transaction_row(t: &Arc<BankTransaction>, color: bool) -> TransactionRow {
    TransactionRow {
        id: t.id.to_string(),
        date: t.date.to_string(),
        description: t.description.clone(),
        amount: money(t.amount),
        matched: t.reconciled_payment_id.as_ref().map_or_else(
            || output::paint("unreconciled", Tone::Busy, color),
            ToString::to_string,
        ),
    }
}

#[derive(Tabled)]
struct PaymentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Invoice")]
    invoice: String,
}

impl From<&Arc<Payment>> for PaymentRow {
    fn from(p: &Arc<Payment>) -> Self {
        Self {
            id: p.id.to_string(),
            date: p.date.to_string(),
            amount: money(p.amount),
            method: p.method.to_string(),
            reference: p.reference.clone(),
            invoice: p
                .invoice_id
                .as_ref()
                .map_or_else(|| "-".into(), ToString::to_string),
        }
    }
}

pub(crate) fn payment_detail(p: &Payment) -> String {
    [
        format!("ID:         {}", p.id),
        format!("Date:       {}", p.date),
        format!("Amount:     {}", money(p.amount)),
        format!("Method:     {}", p.method),
        format!("Reference:  {}", p.reference),
        format!(
            "Invoice:    {}",
            p.invoice_id
                .as_ref()
                .map_or_else(|| "-".into(), ToString::to_string)
        ),
    ]
    .join("\n")
}

fn transaction_id(session: &Session, input: &str) -> EntityId {
    util::resolve_id(
        session.desk.store().bank_transactions_snapshot().as_slice(),
        input,
    )
}

fn print_payments(session: &Session, payments: &[Arc<Payment>]) -> Result<(), CliError> {
    let out = output::render_list(
        session.output,
        payments,
        |p| PaymentRow::from(p),
        |p| p.id.to_string(),
    )?;
    session.print(&out);
    Ok(())
}

pub fn handle(args: BankArgs, session: &mut Session) -> Result<(), CliError> {
    match args.command {
        BankCommand::List { unreconciled } => {
            let lines = if unreconciled {
                session.desk.unreconciled_transactions()
            } else {
                session.desk.store().bank_transactions_snapshot().to_vec()
            };
            let out = output::render_list(
                session.output,
                &lines,
                |t| transaction_row(t, session.color),
                |t| t.id.to_string(),
            )?;
            session.print(&out);
            Ok(())
        }

        BankCommand::Payments => {
            print_payments(session, &session.desk.store().payments_snapshot())
        }

        BankCommand::Candidates { transaction } => {
            let id = transaction_id(session, &transaction);
            let candidates = session.desk.reconciliation_candidates(&id)?;
            if candidates.is_empty() {
                session.note(&format!("No unmatched payments fit transaction {id}"));
            }
            print_payments(session, &candidates)
        }

        BankCommand::Reconcile {
            transaction,
            payment,
        } => {
            let txn_id = transaction_id(session, &transaction);
            let payment_id =
                util::resolve_id(session.desk.store().payments_snapshot().as_slice(), &payment);
            let result = session.apply(CoreCommand::ReconcileTransaction {
                transaction_id: txn_id,
                payment_id,
            })?;
            let CommandResult::BankTransaction(txn) = &result else {
                return Err(unexpected(&result));
            };
            session.note(&format!(
                "Transaction {} matched to payment {}",
                txn.id,
                txn.reconciled_payment_id
                    .as_ref()
                    .map_or_else(String::new, ToString::to_string)
            ));
            let out = output::render_list(
                session.output,
                &[Arc::new(txn.clone())],
                |t| transaction_row(t, session.color),
                |t| t.id.to_string(),
            )?;
            session.print(&out);
            Ok(())
        }
    }
}
