//! Quick search across every record kind.

use tabled::Tabled;

use frontdesk_core::DeskRecord;
use frontdesk_core::model::Identified;

use crate::error::CliError;
use crate::output;

use super::Session;

#[derive(Tabled)]
struct HitRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Match")]
    label: String,
}

impl From<&DeskRecord> for HitRow {
    fn from(r: &DeskRecord) -> Self {
        Self {
            kind: r.kind().to_string(),
            id: r.id().to_string(),
            label: r.label(),
        }
    }
}

pub fn handle(query: &str, session: &Session) -> Result<(), CliError> {
    let hits = session.desk.search(query);
    if hits.is_empty() {
        session.note(&format!("Nothing matches '{query}'"));
        return Ok(());
    }
    let out = output::render_list(
        session.output,
        &hits,
        |r| HitRow::from(r),
        |r| r.id().to_string(),
    )?;
    session.print(&out);
    Ok(())
}
