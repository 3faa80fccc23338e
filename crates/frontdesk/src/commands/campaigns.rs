//! Marketing campaign handlers.

use std::sync::Arc;

use tabled::Tabled;

use frontdesk_core::Campaign;
use frontdesk_core::view::CampaignColumn;

use crate::cli::{CampaignsArgs, CampaignsCommand};
use crate::error::CliError;
use crate::output::{self, Tone, money};

use super::{Session, util};

#[derive(Tabled)]
struct CampaignRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Open %")]
    open_rate: String,
    #[tabled(rename = "Click %")]
    click_rate: String,
    #[tabled(rename = "Conv. %")]
    conversion_rate: String,
}

fn row(c: &Arc<Campaign>, color: bool) -> CampaignRow {
    let spent_tone = if c.is_over_budget() {
        Tone::Alert
    } else {
        Tone::Plain
    };
    CampaignRow {
        name: c.name.clone(),
        channel: c.channel.to_string(),
        status: c.status.to_string(),
        budget: money(c.budget),
        spent: output::paint(&money(c.spent), spent_tone, color),
        open_rate: format!("{:.1}", c.open_rate()),
        click_rate: format!("{:.1}", c.click_rate()),
        conversion_rate: format!("{:.1}", c.conversion_rate()),
    }
}

pub fn handle(args: CampaignsArgs, session: &Session) -> Result<(), CliError> {
    match args.command {
        CampaignsCommand::List(list) => {
            let table = util::table_state::<CampaignColumn>(&list, session.page_size())?;
            let page = session.desk.campaigns_page(&table);
            let out = output::render_page(
                session.output,
                &page,
                |c| row(c, session.color),
                |c| c.id.to_string(),
            )?;
            session.print(&out);
            Ok(())
        }

        CampaignsCommand::Export(export) => {
            let snapshot = session.desk.store().campaigns_snapshot();
            util::export(session, &export, snapshot.as_slice())
        }
    }
}
