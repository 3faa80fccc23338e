//! Equity classes and cap table.

use std::sync::Arc;

use tabled::Tabled;

use frontdesk_core::view::ShareholderColumn;
use frontdesk_core::{EquityClass, Holding};

use crate::cli::{EquityArgs, EquityCommand};
use crate::error::CliError;
use crate::output::{self, money};

use super::{Session, util};

#[derive(Tabled)]
struct ClassRow {
    #[tabled(rename = "Class")]
    name: String,
    #[tabled(rename = "Type")]
    equity_type: String,
    #[tabled(rename = "Authorized")]
    authorized: u64,
    #[tabled(rename = "Issued")]
    issued: u64,
    #[tabled(rename = "Available")]
    available: u64,
    #[tabled(rename = "Issued %")]
    issued_pct: String,
    #[tabled(rename = "Price")]
    price: String,
}

impl From<&Arc<EquityClass>> for ClassRow {
    fn from(c: &Arc<EquityClass>) -> Self {
        Self {
            name: c.name.clone(),
            equity_type: c.equity_type.to_string(),
            authorized: c.authorized_shares,
            issued: c.issued_shares,
            available: c.available_shares(),
            issued_pct: format!("{:.1}", c.issued_pct()),
            price: money(c.price_per_share),
        }
    }
}

#[derive(Tabled)]
struct HoldingRow {
    #[tabled(rename = "Shareholder")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Shares")]
    shares: u64,
    #[tabled(rename = "Ownership %")]
    ownership: String,
    #[tabled(rename = "Type")]
    equity_type: String,
    #[tabled(rename = "Joined")]
    joined: String,
}

impl From<&Holding> for HoldingRow {
    fn from(h: &Holding) -> Self {
        let s = &h.shareholder;
        Self {
            name: s.name.clone(),
            email: s.email.clone(),
            shares: s.shares_held,
            ownership: format!("{:.2}", h.ownership_pct),
            equity_type: s.equity_type.to_string(),
            joined: s.join_date.to_string(),
        }
    }
}

pub fn handle(args: EquityArgs, session: &Session) -> Result<(), CliError> {
    match args.command {
        EquityCommand::Classes => {
            let classes = session.desk.store().equity_classes_snapshot();
            let out = output::render_list(
                session.output,
                &classes,
                |c| ClassRow::from(c),
                |c| c.id.to_string(),
            )?;
            session.print(&out);
            Ok(())
        }

        EquityCommand::CapTable(list) => {
            let table = util::table_state::<ShareholderColumn>(&list, session.page_size())?;
            let page = session.desk.shareholders_page(&table);
            let out = output::render_page(
                session.output,
                &page,
                |h| HoldingRow::from(h),
                |h| h.shareholder.id.to_string(),
            )?;
            session.print(&out);
            Ok(())
        }

        EquityCommand::Export(export) => {
            let cap_table = session.desk.cap_table();
            util::export(session, &export, &cap_table.holdings)
        }
    }
}
