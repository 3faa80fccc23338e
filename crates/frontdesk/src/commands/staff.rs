//! Staff roster handlers.

use std::sync::Arc;

use tabled::Tabled;

use frontdesk_core::StaffMember;

use crate::cli::{StaffArgs, StaffCommand};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::Session;

#[derive(Tabled)]
struct StaffRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Available")]
    available: String,
    #[tabled(rename = "Assignments")]
    assignments: u32,
}

fn row(s: &Arc<StaffMember>, color: bool) -> StaffRow {
    let (label, tone) = if s.is_available {
        ("yes", Tone::Good)
    } else {
        ("no", Tone::Muted)
    };
    StaffRow {
        id: s.id.to_string(),
        name: s.name.clone(),
        role: s.role.clone(),
        available: output::paint(label, tone, color),
        assignments: s.current_assignments,
    }
}

pub fn handle(args: StaffArgs, session: &Session) -> Result<(), CliError> {
    let staff: Vec<Arc<StaffMember>> = match args.command {
        StaffCommand::List => session.desk.store().staff_snapshot().to_vec(),
        StaffCommand::Assignable => session.desk.assignable_staff(),
    };
    let out = output::render_list(
        session.output,
        &staff,
        |s| row(s, session.color),
        |s| s.id.to_string(),
    )?;
    session.print(&out);
    Ok(())
}
