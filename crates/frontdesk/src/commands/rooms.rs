//! Room and housekeeping handlers.

use std::sync::Arc;

use tabled::Tabled;

use frontdesk_core::model::{HousekeepingStatus, RoomStatus};
use frontdesk_core::view::RoomColumn;
use frontdesk_core::{Command as CoreCommand, CommandResult, Room, RoomSummary};

use crate::cli::{RoomsArgs, RoomsCommand};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::{Session, unexpected, util};

#[derive(Tabled)]
struct RoomRow {
    #[tabled(rename = "Room")]
    number: String,
    #[tabled(rename = "Floor")]
    floor: i32,
    #[tabled(rename = "Type")]
    room_type: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Housekeeping")]
    housekeeping: String,
    #[tabled(rename = "Last cleaned")]
    last_cleaned: String,
}

fn status_tone(s: RoomStatus) -> Tone {
    match s {
        RoomStatus::Available => Tone::Good,
        RoomStatus::Occupied | RoomStatus::Reserved => Tone::Busy,
        RoomStatus::Maintenance => Tone::Muted,
        RoomStatus::OutOfOrder => Tone::Alert,
    }
}

fn housekeeping_tone(s: HousekeepingStatus) -> Tone {
    match s {
        HousekeepingStatus::Clean | HousekeepingStatus::Inspected => Tone::Good,
        HousekeepingStatus::Dirty => Tone::Alert,
        HousekeepingStatus::InProgress => Tone::Busy,
    }
}

fn row(r: &Arc<Room>, color: bool) -> RoomRow {
    RoomRow {
        number: r.number.clone(),
        floor: r.floor,
        room_type: r.room_type.to_string(),
        status: output::paint(&r.status.to_string(), status_tone(r.status), color),
        housekeeping: output::paint(
            &r.housekeeping.to_string(),
            housekeeping_tone(r.housekeeping),
            color,
        ),
        last_cleaned: r
            .last_cleaned
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default(),
    }
}

fn detail(r: &Room) -> String {
    [
        format!("Room:          {}", r.number),
        format!("Floor:         {}", r.floor),
        format!("Type:          {}", r.room_type),
        format!("Status:        {}", r.status),
        format!("Housekeeping:  {}", r.housekeeping),
        format!(
            "Housekeeper:   {}",
            r.assigned_housekeeper
                .as_ref()
                .map_or_else(|| "-".into(), ToString::to_string)
        ),
        format!(
            "Last cleaned:  {}",
            r.last_cleaned.map_or_else(|| "-".into(), |t| t.to_rfc3339())
        ),
    ]
    .join("\n")
}

fn summary_detail(s: &RoomSummary) -> String {
    [
        format!("Total:           {}", s.total),
        format!("Available:       {}", s.available),
        format!("Occupied:        {}", s.occupied),
        format!("Reserved:        {}", s.reserved),
        format!("Maintenance:     {}", s.maintenance),
        format!("Out of order:    {}", s.out_of_order),
        format!("Needs cleaning:  {}", s.needs_cleaning),
        format!("Occupancy:       {:.1}%", s.occupancy_pct),
    ]
    .join("\n")
}

pub fn handle(args: RoomsArgs, session: &mut Session) -> Result<(), CliError> {
    match args.command {
        RoomsCommand::List { status, list } => {
            let status = util::parse_opt_variant::<RoomStatus>("status", status.as_deref())?;
            let table = util::table_state::<RoomColumn>(&list, session.page_size())?;
            let page = session.desk.rooms_page(status, &table);
            let out = output::render_page(
                session.output,
                &page,
                |r| row(r, session.color),
                |r| r.number.clone(),
            )?;
            session.print(&out);
            Ok(())
        }

        RoomsCommand::Summary => {
            let summary = session.desk.room_summary();
            let out = output::render_single(session.output, &summary, summary_detail, |s| {
                format!("{:.1}", s.occupancy_pct)
            })?;
            session.print(&out);
            Ok(())
        }

        RoomsCommand::Dirty => {
            let rooms = session.desk.rooms_needing_cleaning();
            let out = output::render_list(
                session.output,
                &rooms,
                |r| row(r, session.color),
                |r| r.number.clone(),
            )?;
            session.print(&out);
            Ok(())
        }

        RoomsCommand::Housekeeping {
            room,
            status,
            housekeeper,
        } => {
            let status = util::parse_variant::<HousekeepingStatus>("status", &status)?;
            let housekeeper = housekeeper.as_deref().map(|s| {
                util::resolve_id(session.desk.store().staff_snapshot().as_slice(), s)
            });
            let result = session.apply(CoreCommand::SetHousekeeping {
                room_number: room,
                status,
                housekeeper,
            })?;
            let CommandResult::Room(room) = &result else {
                return Err(unexpected(&result));
            };
            session.note(&format!("Room {} marked {}", room.number, room.housekeeping));
            let out = output::render_single(session.output, room, detail, |r| r.number.clone())?;
            session.print(&out);
            Ok(())
        }
    }
}
