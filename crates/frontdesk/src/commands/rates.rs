//! Room rate listing.

use std::sync::Arc;

use tabled::Tabled;

use frontdesk_core::Rate;
use frontdesk_core::model::RateStatus;
use frontdesk_core::view::RateColumn;

use crate::cli::RatesArgs;
use crate::error::CliError;
use crate::output::{self, Tone, money};

use super::{Session, util};

#[derive(Tabled)]
struct RateRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Room type")]
    room_type: String,
    #[tabled(rename = "Base")]
    base: String,
    #[tabled(rename = "Discount")]
    discount: String,
    #[tabled(rename = "Effective")]
    effective: String,
    #[tabled(rename = "Min nights")]
    min_nights: u32,
    #[tabled(rename = "Valid")]
    valid: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn row(r: &Arc<Rate>, color: bool) -> RateRow {
    let tone = match r.status {
        RateStatus::Active => Tone::Good,
        RateStatus::Scheduled => Tone::Busy,
        RateStatus::Inactive => Tone::Muted,
    };
    let bound = |d: Option<chrono::NaiveDate>| d.map_or_else(|| "open".to_owned(), |d| d.to_string());
    RateRow {
        name: r.name.clone(),
        room_type: r.room_type.to_string(),
        base: money(r.base_rate),
        discount: format!("{:.0}%", r.discount_pct),
        effective: money(r.effective_rate()),
        min_nights: r.min_nights,
        valid: format!("{} to {}", bound(r.valid_from), bound(r.valid_to)),
        status: output::paint(&r.status.to_string(), tone, color),
    }
}

pub fn handle(args: &RatesArgs, session: &Session) -> Result<(), CliError> {
    let table = util::table_state::<RateColumn>(&args.list, session.page_size())?;
    let page = session.desk.rates_page(args.current, &table);
    let out = output::render_page(
        session.output,
        &page,
        |r| row(r, session.color),
        |r| r.id.to_string(),
    )?;
    session.print(&out);
    Ok(())
}
