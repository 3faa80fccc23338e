//! Guest handlers: lists, arrivals and departures, check-in / check-out.

use std::sync::Arc;

use tabled::Tabled;

use frontdesk_core::model::GuestStatus;
use frontdesk_core::view::{GuestColumn, GuestFilter};
use frontdesk_core::{Command as CoreCommand, CommandResult, EntityId, Guest};

use crate::cli::{GuestsArgs, GuestsCommand};
use crate::error::CliError;
use crate::output::{self, Tone, money};

use super::{Session, unexpected, util};

#[derive(Tabled)]
struct GuestRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Room")]
    room: String,
    #[tabled(rename = "Check-in")]
    check_in: String,
    #[tabled(rename = "Check-out")]
    check_out: String,
    #[tabled(rename = "Nights")]
    nights: u32,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "VIP")]
    vip: String,
    #[tabled(rename = "Spent")]
    spent: String,
}

fn status_tone(s: GuestStatus) -> Tone {
    match s {
        GuestStatus::Reserved => Tone::Busy,
        GuestStatus::CheckedIn => Tone::Good,
        GuestStatus::CheckedOut => Tone::Plain,
        GuestStatus::Cancelled => Tone::Muted,
    }
}

fn row(g: &Arc<Guest>, color: bool) -> GuestRow {
    GuestRow {
        id: g.id.to_string(),
        name: g.name.clone(),
        room: g.room_number.clone().unwrap_or_else(|| "-".into()),
        check_in: g.check_in.to_string(),
        check_out: g.check_out.to_string(),
        nights: g.nights(),
        status: output::paint(&g.status.to_string(), status_tone(g.status), color),
        vip: if g.vip { "★".into() } else { String::new() },
        spent: money(g.total_spent),
    }
}

fn detail(g: &Guest) -> String {
    [
        format!("ID:         {}", g.id),
        format!("Name:       {}", g.name),
        format!("Email:      {}", g.email),
        format!("Phone:      {}", g.phone),
        format!("Room:       {}", g.room_number.as_deref().unwrap_or("-")),
        format!("Stay:       {} → {} ({} nights)", g.check_in, g.check_out, g.nights()),
        format!("Status:     {}", g.status),
        format!("VIP:        {}", if g.vip { "yes" } else { "no" }),
        format!("Spent:      {}", money(g.total_spent)),
    ]
    .join("\n")
}

fn guest_id(session: &Session, input: &str) -> EntityId {
    util::resolve_id(session.desk.store().guests_snapshot().as_slice(), input)
}

fn show_result(session: &Session, result: &CommandResult, message: &str) -> Result<(), CliError> {
    let CommandResult::Guest(guest) = result else {
        return Err(unexpected(result));
    };
    session.note(&format!("{message}: {}", guest.name));
    let out = output::render_single(session.output, guest, detail, |g| g.id.to_string())?;
    session.print(&out);
    Ok(())
}

fn print_guests(session: &Session, guests: &[Arc<Guest>]) -> Result<(), CliError> {
    let out = output::render_list(
        session.output,
        guests,
        |g| row(g, session.color),
        |g| g.id.to_string(),
    )?;
    session.print(&out);
    Ok(())
}

pub fn handle(args: GuestsArgs, session: &mut Session) -> Result<(), CliError> {
    match args.command {
        GuestsCommand::List {
            status,
            vip,
            staying_on,
            list,
        } => {
            let filter = GuestFilter {
                status: util::parse_opt_variant("status", status.as_deref())?,
                vip_only: vip,
                staying_on: util::parse_opt_date("staying-on", staying_on.as_deref())?,
            };
            let table = util::table_state::<GuestColumn>(&list, session.page_size())?;
            let page = session.desk.guests_page(&filter, &table);
            let out = output::render_page(
                session.output,
                &page,
                |g| row(g, session.color),
                |g| g.id.to_string(),
            )?;
            session.print(&out);
            Ok(())
        }

        GuestsCommand::Arrivals => print_guests(session, &session.desk.arrivals_today()),

        GuestsCommand::Departures => print_guests(session, &session.desk.departures_today()),

        GuestsCommand::CheckIn { guest, room } => {
            let id = guest_id(session, &guest);
            let result = session.apply(CoreCommand::CheckInGuest {
                id,
                room_number: room,
            })?;
            show_result(session, &result, "Checked in")
        }

        GuestsCommand::CheckOut { guest } => {
            let id = guest_id(session, &guest);
            let result = session.apply(CoreCommand::CheckOutGuest { id })?;
            show_result(session, &result, "Checked out")
        }

        GuestsCommand::Export(export) => {
            let snapshot = session.desk.store().guests_snapshot();
            util::export(session, &export, snapshot.as_slice())
        }
    }
}
