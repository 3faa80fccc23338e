//! Invoice handlers: lists, aging, payments.

use std::sync::Arc;

use tabled::Tabled;

use frontdesk_core::model::{InvoiceItem, InvoiceStatus, PaymentMethod};
use frontdesk_core::view::{InvoiceColumn, InvoiceFilter};
use frontdesk_core::{
    AgingReport, Command as CoreCommand, CommandResult, Invoice, LedgerSide, NewPayment,
};

use crate::cli::{InvoicesArgs, InvoicesCommand};
use crate::error::CliError;
use crate::output::{self, Tone, money};

use super::bank::payment_detail;
use super::{Session, unexpected, util};

#[derive(Tabled)]
struct InvoiceRow {
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Side")]
    side: String,
    #[tabled(rename = "Counterparty")]
    counterparty: String,
    #[tabled(rename = "Issued")]
    issued: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn status_tone(s: InvoiceStatus) -> Tone {
    match s {
        InvoiceStatus::Paid => Tone::Good,
        InvoiceStatus::Sent | InvoiceStatus::PartiallyPaid => Tone::Busy,
        InvoiceStatus::Overdue => Tone::Alert,
        InvoiceStatus::Draft | InvoiceStatus::Void => Tone::Muted,
    }
}

fn row(i: &Arc<Invoice>, today: chrono::NaiveDate, color: bool) -> InvoiceRow {
    let status = i.effective_status(today);
    InvoiceRow {
        number: i.number.clone(),
        side: i.side.to_string(),
        counterparty: i.counterparty.clone(),
        issued: i.issue_date.to_string(),
        due: i.due_date.to_string(),
        total: money(i.total()),
        balance: money(i.balance_due()),
        status: output::paint(&status.to_string(), status_tone(status), color),
    }
}

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Unit price")]
    unit_price: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl From<&InvoiceItem> for ItemRow {
    fn from(item: &InvoiceItem) -> Self {
        Self {
            description: item.description.clone(),
            quantity: item.quantity.to_string(),
            unit_price: money(item.unit_price),
            amount: money(item.amount()),
        }
    }
}

fn detail(i: &Invoice, today: chrono::NaiveDate) -> String {
    let mut lines = vec![
        format!("ID:            {}", i.id),
        format!("Number:        {}", i.number),
        format!("Side:          {}", i.side),
        format!("Counterparty:  {}", i.counterparty),
        format!("Issued:        {}", i.issue_date),
        format!("Due:           {}", i.due_date),
        format!("Status:        {}", i.effective_status(today)),
    ];
    if i.is_overdue(today) {
        lines.push(format!("Days overdue:  {}", i.days_overdue(today)));
    }
    let items: Vec<ItemRow> = i.items.iter().map(ItemRow::from).collect();
    lines.push(output::render_table(&items));
    lines.push(format!("Subtotal:      {}", money(i.subtotal())));
    lines.push(format!("Tax ({}%):     {}", i.tax_rate_pct, money(i.tax())));
    lines.push(format!("Total:         {}", money(i.total())));
    lines.push(format!("Paid:          {}", money(i.amount_paid)));
    lines.push(format!("Balance due:   {}", money(i.balance_due())));
    lines.join("\n")
}

fn aging_detail(r: &AgingReport) -> String {
    [
        format!("{} aging ({} open)", r.side, r.open_invoices),
        format!("Current:   {}", money(r.current)),
        format!("1-30:      {}", money(r.days_1_30)),
        format!("31-60:     {}", money(r.days_31_60)),
        format!("61-90:     {}", money(r.days_61_90)),
        format!("90+:       {}", money(r.over_90)),
        format!("Total:     {}", money(r.total)),
    ]
    .join("\n")
}

fn find_invoice(session: &Session, key: &str) -> Result<Arc<Invoice>, CliError> {
    let id = util::resolve_id(session.desk.store().invoices_snapshot().as_slice(), key);
    session
        .desk
        .find_invoice(&id.to_string())
        .or_else(|| session.desk.find_invoice(key))
        .ok_or_else(|| CliError::NotFound {
            resource_type: "Invoice".into(),
            identifier: key.into(),
            list_command: "invoices list".into(),
        })
}

pub fn handle(args: InvoicesArgs, session: &mut Session) -> Result<(), CliError> {
    let today = session.desk.today();
    match args.command {
        InvoicesCommand::List {
            side,
            status,
            overdue,
            list,
        } => {
            let filter = InvoiceFilter {
                side: util::parse_opt_variant("side", side.as_deref())?,
                status: util::parse_opt_variant("status", status.as_deref())?,
                overdue_as_of: overdue.then_some(today),
            };
            let table = util::table_state::<InvoiceColumn>(&list, session.page_size())?;
            let page = session.desk.invoices_page(&filter, &table);
            let out = output::render_page(
                session.output,
                &page,
                |i| row(i, today, session.color),
                |i| i.number.clone(),
            )?;
            session.print(&out);
            Ok(())
        }

        InvoicesCommand::Show { invoice } => {
            let found = find_invoice(session, &invoice)?;
            let out = output::render_single(
                session.output,
                &found,
                |i| detail(i, today),
                |i| i.number.clone(),
            )?;
            session.print(&out);
            Ok(())
        }

        InvoicesCommand::Aging { side } => {
            let side = util::parse_variant::<LedgerSide>("side", &side)?;
            let report = session.desk.aging(side);
            let out = output::render_single(session.output, &report, aging_detail, |r| {
                money(r.total)
            })?;
            session.print(&out);
            Ok(())
        }

        InvoicesCommand::Pay {
            invoice,
            amount,
            method,
            reference,
            date,
        } => {
            let target = find_invoice(session, &invoice)?;
            let data = NewPayment {
                id: None,
                invoice_id: Some(target.id.clone()),
                date: util::parse_opt_date("date", date.as_deref())?.unwrap_or(today),
                amount,
                method: util::parse_choice::<PaymentMethod>(
                    "method",
                    &method,
                    "card, cash, transfer, cheque, other",
                )?,
                reference,
            };
            let result = session.apply(CoreCommand::RecordPayment(data))?;
            let CommandResult::Payment(payment) = &result else {
                return Err(unexpected(&result));
            };
            if let Some(updated) = session.desk.store().invoice_by_id(&target.id) {
                session.note(&format!(
                    "Payment {} recorded; {} balance due {} ({})",
                    payment.id,
                    updated.number,
                    money(updated.balance_due()),
                    updated.status
                ));
            }
            let out = output::render_single(session.output, payment, payment_detail, |p| {
                p.id.to_string()
            })?;
            session.print(&out);
            Ok(())
        }

        InvoicesCommand::Export(export) => {
            let snapshot = session.desk.store().invoices_snapshot();
            util::export(session, &export, snapshot.as_slice())
        }
    }
}
