//! Journal entry handlers: drafts, posting, trial balance.

use std::sync::Arc;

use serde::Serialize;
use tabled::Tabled;

use frontdesk_core::journal::TrialBalanceRow;
use frontdesk_core::model::LineType;
use frontdesk_core::{
    BalanceCheck, Command as CoreCommand, CommandResult, CoreError, JournalDraft, JournalEntry,
    JournalLine, TrialBalance, ValidationErrors,
};

use crate::cli::{DraftArgs, JournalArgs, JournalCommand};
use crate::dataset;
use crate::error::CliError;
use crate::output::{self, Tone, money};

use super::{Session, unexpected, util};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Debits")]
    debits: String,
    #[tabled(rename = "Credits")]
    credits: String,
    #[tabled(rename = "Posted")]
    posted: String,
}

fn entry_row(e: &Arc<JournalEntry>, color: bool) -> EntryRow {
    let posted = if e.posted {
        output::paint("posted", Tone::Good, color)
    } else {
        output::paint("draft", Tone::Busy, color)
    };
    EntryRow {
        id: e.id.to_string(),
        reference: e.reference.clone(),
        date: e.date.map(|d| d.to_string()).unwrap_or_default(),
        description: e.description.clone(),
        debits: money(e.total_debits()),
        credits: money(e.total_credits()),
        posted,
    }
}

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Debit")]
    debit: String,
    #[tabled(rename = "Credit")]
    credit: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&JournalLine> for LineRow {
    fn from(l: &JournalLine) -> Self {
        let (debit, credit) = match l.line_type {
            LineType::Debit => (money(l.amount), String::new()),
            LineType::Credit => (String::new(), money(l.amount)),
        };
        Self {
            account: l.account_label(),
            debit,
            credit,
            description: l.description.clone(),
        }
    }
}

#[derive(Tabled)]
struct TrialRow {
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Debits")]
    debits: String,
    #[tabled(rename = "Credits")]
    credits: String,
    #[tabled(rename = "Net")]
    net: String,
}

impl From<&TrialBalanceRow> for TrialRow {
    fn from(r: &TrialBalanceRow) -> Self {
        Self {
            account: r.account_code.clone(),
            name: r.account_name.clone(),
            debits: money(r.debits),
            credits: money(r.credits),
            net: money(r.net()),
        }
    }
}

// ── Detail views ────────────────────────────────────────────────────

fn balance_lines(check: &BalanceCheck) -> Vec<String> {
    vec![
        format!("Debits:       {}", money(check.total_debits)),
        format!("Credits:      {}", money(check.total_credits)),
        format!("Difference:   {}", money(check.difference)),
        format!("Balanced:     {}", if check.balanced { "yes" } else { "no" }),
    ]
}

fn entry_detail(e: &JournalEntry, tolerance: f64) -> String {
    let mut lines = vec![
        format!("ID:           {}", e.id),
        format!("Reference:    {}", e.reference),
        format!(
            "Date:         {}",
            e.date.map_or_else(|| "-".into(), |d| d.to_string())
        ),
        format!("Description:  {}", e.description),
        format!("Posted:       {}", if e.posted { "yes" } else { "no" }),
    ];
    lines.extend(balance_lines(&BalanceCheck::of(e, tolerance)));
    let rows: Vec<LineRow> = e.lines.iter().map(LineRow::from).collect();
    lines.push(output::render_table(&rows));
    lines.join("\n")
}

fn trial_detail(tb: &TrialBalance) -> String {
    let rows: Vec<TrialRow> = tb.rows.iter().map(TrialRow::from).collect();
    format!(
        "{}\nTotal debits {}  Total credits {}",
        output::render_table(&rows),
        money(tb.total_debits),
        money(tb.total_credits)
    )
}

/// What `journal check` reports for a draft.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DraftReport {
    #[serde(flatten)]
    balance: BalanceCheck,
    can_submit: bool,
    errors: ValidationErrors,
}

fn report_detail(r: &DraftReport) -> String {
    let mut lines = balance_lines(&r.balance);
    lines.push(format!(
        "Can submit:   {}",
        if r.can_submit { "yes" } else { "no" }
    ));
    if !r.balance.balanced {
        lines.push(r.balance.message());
    }
    for (field, message) in r.errors.iter() {
        lines.push(format!("  {field}: {message}"));
    }
    lines.join("\n")
}

// ── Draft input ─────────────────────────────────────────────────────

/// `CODE=AMOUNT` or `CODE:Account name=AMOUNT`.
fn parse_line(spec: &str, line_type: LineType) -> Result<JournalLine, CliError> {
    let field = match line_type {
        LineType::Debit => "debit",
        LineType::Credit => "credit",
    };
    let invalid = || CliError::Validation {
        field: field.into(),
        reason: format!("expected ACCOUNT=AMOUNT, got '{spec}'"),
    };
    let (account, amount) = spec.rsplit_once('=').ok_or_else(invalid)?;
    let amount: f64 = amount.trim().parse().map_err(|_| invalid())?;
    let (code, name) = account.split_once(':').unwrap_or((account, ""));
    Ok(JournalLine {
        account_code: code.trim().to_owned(),
        account_name: name.trim().to_owned(),
        line_type,
        amount,
        description: String::new(),
    })
}

fn build_draft(session: &Session, args: DraftArgs) -> Result<JournalDraft, CliError> {
    let mut draft = match &args.from_file {
        Some(path) => dataset::read_document::<JournalDraft>(path)?,
        None => {
            let mut lines = Vec::with_capacity(args.debit.len() + args.credit.len());
            for spec in &args.debit {
                lines.push(parse_line(spec, LineType::Debit)?);
            }
            for spec in &args.credit {
                lines.push(parse_line(spec, LineType::Credit)?);
            }
            JournalDraft {
                reference: String::new(),
                date: Some(session.desk.today()),
                description: String::new(),
                lines,
            }
        }
    };

    if let Some(reference) = args.reference {
        draft.reference = reference;
    }
    if let Some(date) = util::parse_opt_date("date", args.date.as_deref())? {
        draft.date = Some(date);
    }
    if !args.description.is_empty() {
        draft.description = args.description;
    }
    Ok(draft)
}

fn find_entry(session: &Session, key: &str) -> Result<Arc<JournalEntry>, CliError> {
    let id = util::resolve_id(session.desk.store().journal_entries_snapshot().as_slice(), key);
    session
        .desk
        .find_journal_entry(&id.to_string())
        .or_else(|| session.desk.find_journal_entry(key))
        .ok_or_else(|| CliError::NotFound {
            resource_type: "Journal entry".into(),
            identifier: key.into(),
            list_command: "journal list".into(),
        })
}

fn show_entry(session: &Session, entry: &JournalEntry) -> Result<(), CliError> {
    let tolerance = session.desk.config().balance_tolerance;
    let out = output::render_single(
        session.output,
        entry,
        |e| entry_detail(e, tolerance),
        |e| e.id.to_string(),
    )?;
    session.print(&out);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: JournalArgs, session: &mut Session) -> Result<(), CliError> {
    match args.command {
        JournalCommand::List => {
            let entries = session.desk.store().journal_entries_snapshot();
            let out = output::render_list(
                session.output,
                &entries,
                |e| entry_row(e, session.color),
                |e| e.id.to_string(),
            )?;
            session.print(&out);
            Ok(())
        }

        JournalCommand::Show { entry } => {
            let found = find_entry(session, &entry)?;
            show_entry(session, &found)
        }

        JournalCommand::Check(draft_args) => {
            let draft = build_draft(session, draft_args)?;
            let rules = session.desk.config().balance_rules();
            let report = DraftReport {
                balance: draft.balance(rules.tolerance),
                can_submit: draft.can_submit(&rules),
                errors: draft.validate(&rules),
            };
            let out = output::render_single(session.output, &report, report_detail, |r| {
                if r.errors.is_empty() { "ok" } else { "invalid" }.to_owned()
            })?;
            session.print(&out);
            if report.errors.is_empty() {
                Ok(())
            } else {
                Err(CoreError::Validation(report.errors).into())
            }
        }

        JournalCommand::Submit(draft_args) => {
            let draft = build_draft(session, draft_args)?;
            match session.apply(CoreCommand::SubmitJournalEntry(draft))? {
                CommandResult::JournalEntry(entry) => {
                    session.note(&format!("Journal entry submitted: {}", entry.reference));
                    show_entry(session, &entry)
                }
                other => Err(unexpected(&other)),
            }
        }

        JournalCommand::Post { entry } => {
            let id = find_entry(session, &entry)?.id.clone();
            match session.apply(CoreCommand::PostJournalEntry { id })? {
                CommandResult::JournalEntry(entry) => {
                    session.note(&format!("Journal entry posted: {}", entry.reference));
                    show_entry(session, &entry)
                }
                other => Err(unexpected(&other)),
            }
        }

        JournalCommand::TrialBalance => {
            let tb = session.desk.trial_balance();
            let out = output::render_single(session.output, &tb, trial_detail, |tb| {
                format!("{} {}", money(tb.total_debits), money(tb.total_credits))
            })?;
            session.print(&out);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn line_specs_carry_code_name_and_amount() {
        let line = parse_line("4000:Room Revenue=250.5", LineType::Credit).unwrap();
        assert_eq!(line.account_code, "4000");
        assert_eq!(line.account_name, "Room Revenue");
        assert_eq!(line.line_type, LineType::Credit);
        assert!((line.amount - 250.5).abs() < f64::EPSILON);

        let bare = parse_line("1000=90", LineType::Debit).unwrap();
        assert_eq!(bare.account_code, "1000");
        assert!(bare.account_name.is_empty());

        assert!(matches!(
            parse_line("1000", LineType::Debit),
            Err(CliError::Validation { field, .. }) if field == "debit"
        ));
        assert!(parse_line("1000=ten", LineType::Debit).is_err());
    }
}
