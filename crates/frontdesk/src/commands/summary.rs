//! Dashboard roll-up.

use frontdesk_core::DeskSummary;

use crate::error::CliError;
use crate::output::{self, money};

use super::Session;

fn detail(s: &DeskSummary) -> String {
    let r = &s.requests;
    let rooms = &s.rooms;
    let p = &s.pipeline;
    [
        "Requests".to_owned(),
        format!("  Open {}  In progress {}  Resolved today {}", r.open, r.in_progress, r.resolved_today),
        format!("  Avg response {:.0} min", r.avg_response_minutes),
        "Rooms".to_owned(),
        format!(
            "  {} rooms, {} occupied ({:.1}%), {} need cleaning",
            rooms.total, rooms.occupied, rooms.occupancy_pct, rooms.needs_cleaning
        ),
        "Guests".to_owned(),
        format!(
            "  Arrivals {}  Departures {}  In house {}",
            s.arrivals_today, s.departures_today, s.in_house
        ),
        "Accounts".to_owned(),
        format!(
            "  Receivable {} (overdue {})  Payable {}",
            money(s.receivables_outstanding),
            money(s.receivables_overdue),
            money(s.payables_outstanding)
        ),
        format!("  Unreconciled bank lines {}", s.unreconciled_transactions),
        "Pipeline".to_owned(),
        format!(
            "  {} open leads worth {} (weighted {}), win rate {:.1}%",
            p.open_leads,
            money(p.open_value),
            money(p.weighted_value),
            p.win_rate_pct
        ),
    ]
    .join("\n")
}

pub fn handle(session: &Session) -> Result<(), CliError> {
    let summary = session.desk.summary();
    let out = output::render_single(session.output, &summary, detail, |s| {
        format!("{} {}", s.requests.open, s.rooms.occupied)
    })?;
    session.print(&out);
    Ok(())
}
