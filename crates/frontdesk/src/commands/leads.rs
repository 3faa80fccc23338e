//! Sales lead handlers.

use std::sync::Arc;

use tabled::Tabled;

use frontdesk_core::model::LeadStatus;
use frontdesk_core::view::{LeadColumn, LeadFilter};
use frontdesk_core::{Lead, PipelineSummary};

use crate::cli::{LeadsArgs, LeadsCommand};
use crate::error::CliError;
use crate::output::{self, Tone, money};

use super::{Session, util};

#[derive(Tabled)]
struct LeadRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Prob.")]
    probability: String,
    #[tabled(rename = "Weighted")]
    weighted: String,
}

fn row(l: &Arc<Lead>, color: bool) -> LeadRow {
    let tone = match l.status {
        LeadStatus::Won => Tone::Good,
        LeadStatus::Lost => Tone::Muted,
        LeadStatus::Negotiation | LeadStatus::Proposal => Tone::Busy,
        _ => Tone::Plain,
    };
    LeadRow {
        name: l.name.clone(),
        company: l.company.clone(),
        source: l.source.to_string(),
        status: output::paint(&l.status.to_string(), tone, color),
        value: money(l.estimated_value),
        probability: format!("{:.0}%", l.probability_pct),
        weighted: money(l.weighted_value()),
    }
}

fn pipeline_detail(p: &PipelineSummary) -> String {
    [
        format!("Open leads:      {}", p.open_leads),
        format!("Open value:      {}", money(p.open_value)),
        format!("Weighted value:  {}", money(p.weighted_value)),
        format!("Won:             {} ({})", p.won, money(p.won_value)),
        format!("Lost:            {}", p.lost),
        format!("Win rate:        {:.1}%", p.win_rate_pct),
    ]
    .join("\n")
}

pub fn handle(args: LeadsArgs, session: &Session) -> Result<(), CliError> {
    match args.command {
        LeadsCommand::List {
            status,
            owner,
            open,
            list,
        } => {
            let filter = LeadFilter {
                status: util::parse_opt_variant("status", status.as_deref())?,
                owner: owner.as_deref().map(|o| {
                    util::resolve_id(session.desk.store().staff_snapshot().as_slice(), o)
                }),
                open_only: open,
            };
            let table = util::table_state::<LeadColumn>(&list, session.page_size())?;
            let page = session.desk.leads_page(&filter, &table);
            let out = output::render_page(
                session.output,
                &page,
                |l| row(l, session.color),
                |l| l.id.to_string(),
            )?;
            session.print(&out);
            Ok(())
        }

        LeadsCommand::Pipeline => {
            let pipeline = session.desk.pipeline();
            let out = output::render_single(session.output, &pipeline, pipeline_detail, |p| {
                money(p.weighted_value)
            })?;
            session.print(&out);
            Ok(())
        }

        LeadsCommand::Export(export) => {
            let snapshot = session.desk.store().leads_snapshot();
            util::export(session, &export, snapshot.as_slice())
        }
    }
}
