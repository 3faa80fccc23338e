//! Service request command handlers.

use std::sync::Arc;

use tabled::Tabled;

use frontdesk_core::model::{ServiceRequest, StaffMember};
use frontdesk_core::view::{RequestColumn, RequestFilter, RequestStats};
use frontdesk_core::{
    Command as CoreCommand, CommandResult, EntityId, NewServiceRequest, Priority, RequestStatus,
    ServiceType,
};

use crate::cli::{RequestFilterArgs, RequestsArgs, RequestsCommand};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::{Session, unexpected, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RequestRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Guest")]
    guest: String,
    #[tabled(rename = "Room")]
    room: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Requested")]
    requested: String,
    #[tabled(rename = "Assigned")]
    assigned: String,
}

impl RequestRow {
    fn new(r: &ServiceRequest, staff: &[Arc<StaffMember>], color: bool) -> Self {
        Self {
            id: r.id.to_string(),
            guest: r.guest_name.clone(),
            room: r.room_number.clone(),
            service: r.service_type.to_string(),
            priority: output::paint(&r.priority.to_string(), priority_tone(r.priority), color),
            status: output::paint(&r.status.to_string(), status_tone(r.status), color),
            requested: r.requested_at.format("%Y-%m-%d %H:%M").to_string(),
            assigned: assignee_names(r, staff),
        }
    }
}

fn priority_tone(p: Priority) -> Tone {
    match p {
        Priority::Urgent => Tone::Alert,
        Priority::High => Tone::Busy,
        Priority::Normal => Tone::Plain,
        Priority::Low => Tone::Muted,
    }
}

fn status_tone(s: RequestStatus) -> Tone {
    match s {
        RequestStatus::Open => Tone::Alert,
        RequestStatus::InProgress => Tone::Busy,
        RequestStatus::Resolved => Tone::Good,
        RequestStatus::Cancelled => Tone::Muted,
    }
}

fn assignee_names(r: &ServiceRequest, staff: &[Arc<StaffMember>]) -> String {
    if r.assigned_staff_ids.is_empty() {
        return "-".into();
    }
    r.assigned_staff_ids
        .iter()
        .map(|id| {
            staff
                .iter()
                .find(|s| &s.id == id)
                .map_or_else(|| id.to_string(), |s| s.name.clone())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn detail(r: &ServiceRequest, staff: &[Arc<StaffMember>]) -> String {
    let mut lines = vec![
        format!("ID:         {}", r.id),
        format!("Guest:      {}", r.guest_name),
        format!("Room:       {}", r.room_number),
        format!("Service:    {}", r.service_type),
        format!("Priority:   {}", r.priority),
        format!("Status:     {}", r.status),
        format!("Requested:  {}", r.requested_at.to_rfc3339()),
        format!(
            "ETA:        {}",
            r.eta.map_or_else(|| "-".into(), |t| t.to_rfc3339())
        ),
        format!("Assigned:   {}", assignee_names(r, staff)),
    ];
    if let Some(done) = r.completed_at {
        lines.push(format!("Completed:  {}", done.to_rfc3339()));
    }
    if !r.notes.is_empty() {
        lines.push(format!("Notes:      {}", r.notes));
    }
    if let Some(file) = &r.attachment {
        lines.push(format!("Attachment: {file}"));
    }
    if !r.activity.is_empty() {
        lines.push(String::new());
        lines.push("Activity:".into());
        for entry in &r.activity {
            lines.push(format!(
                "  {}  {:<16} {}",
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                entry.action.to_string(),
                entry.details
            ));
        }
    }
    lines.join("\n")
}

fn stats_detail(s: &RequestStats) -> String {
    [
        format!("Open:              {}", s.open),
        format!("In progress:       {}", s.in_progress),
        format!("Resolved today:    {}", s.resolved_today),
        format!("Avg response:      {:.0} min", s.avg_response_minutes),
    ]
    .join("\n")
}

// ── Helpers ─────────────────────────────────────────────────────────

fn request_id(session: &Session, input: &str) -> EntityId {
    util::resolve_id(session.desk.store().requests_snapshot().as_slice(), input)
}

fn staff_id(session: &Session, input: &str) -> EntityId {
    util::resolve_id(session.desk.store().staff_snapshot().as_slice(), input)
}

fn request_filter(session: &Session, args: &RequestFilterArgs) -> Result<RequestFilter, CliError> {
    Ok(RequestFilter {
        status: util::parse_opt_variant("status", args.status.as_deref())?,
        priority: util::parse_opt_variant("priority", args.priority.as_deref())?,
        service_type: util::parse_opt_variant("service", args.service.as_deref())?,
        assigned_to: args.assigned_to.as_deref().map(|s| staff_id(session, s)),
        from: util::parse_opt_date("from", args.from.as_deref())?,
        to: util::parse_opt_date("to", args.to.as_deref())?,
    })
}

/// Print the updated request after a write.
fn show_result(session: &Session, result: &CommandResult, message: &str) -> Result<(), CliError> {
    let CommandResult::Request(request) = result else {
        return Err(unexpected(result));
    };
    session.note(&format!("{message}: {}", request.id));
    let staff = session.desk.store().staff_snapshot();
    let out = output::render_single(
        session.output,
        request,
        |r| detail(r, &staff),
        |r| r.id.to_string(),
    )?;
    session.print(&out);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub fn handle(args: RequestsArgs, session: &mut Session) -> Result<(), CliError> {
    match args.command {
        RequestsCommand::List { filter, list } => {
            let filter = request_filter(session, &filter)?;
            let table = util::table_state::<RequestColumn>(&list, session.page_size())?;
            let page = session.desk.filtered_requests(&filter, &table);
            let staff = session.desk.store().staff_snapshot();
            let out = output::render_page(
                session.output,
                &page,
                |r| RequestRow::new(r, &staff, session.color),
                |r| r.id.to_string(),
            )?;
            session.print(&out);
            Ok(())
        }

        RequestsCommand::Queue => {
            let queue = session.desk.queue();
            let staff = session.desk.store().staff_snapshot();
            let out = output::render_list(
                session.output,
                &queue,
                |r| RequestRow::new(r, &staff, session.color),
                |r| r.id.to_string(),
            )?;
            session.print(&out);
            Ok(())
        }

        RequestsCommand::Show { request } => {
            let id = request_id(session, &request);
            let found = session
                .desk
                .store()
                .request_by_id(&id)
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "Request".into(),
                    identifier: request,
                    list_command: "requests list".into(),
                })?;
            let staff = session.desk.store().staff_snapshot();
            let out = output::render_single(
                session.output,
                &found,
                |r| detail(r, &staff),
                |r| r.id.to_string(),
            )?;
            session.print(&out);
            Ok(())
        }

        RequestsCommand::Add {
            guest,
            room,
            service,
            priority,
            notes,
            eta,
            attachment,
        } => {
            let data = NewServiceRequest {
                id: None,
                guest_name: guest,
                room_number: room,
                service_type: util::parse_variant::<ServiceType>("service", &service)?,
                priority: util::parse_variant("priority", &priority)?,
                notes,
                eta: eta.as_deref().map(|t| util::parse_instant("eta", t)).transpose()?,
                attachment,
            };
            let result = session.apply(CoreCommand::AddRequest(data))?;
            show_result(session, &result, "Request created")
        }

        RequestsCommand::Assign { request, staff } => {
            let id = request_id(session, &request);
            let staff_ids = staff.iter().map(|s| staff_id(session, s)).collect();
            let result = session.apply(CoreCommand::AssignRequest { id, staff_ids })?;
            show_result(session, &result, "Request assigned")
        }

        RequestsCommand::Start { request, staff } => {
            let id = request_id(session, &request);
            let picked = staff.as_deref().map(|s| staff_id(session, s));
            let result = session.apply(CoreCommand::StartRequest {
                id,
                staff_id: picked,
            })?;
            show_result(session, &result, "Request started")
        }

        RequestsCommand::Resolve { request, note } => {
            let id = request_id(session, &request);
            let result = session.apply(CoreCommand::ResolveRequest { id, note })?;
            show_result(session, &result, "Request resolved")
        }

        RequestsCommand::Cancel { request, reason } => {
            let id = request_id(session, &request);
            let result = session.apply(CoreCommand::CancelRequest { id, reason })?;
            show_result(session, &result, "Request cancelled")
        }

        RequestsCommand::Priority { request, priority } => {
            let id = request_id(session, &request);
            let priority = util::parse_variant("priority", &priority)?;
            let result = session.apply(CoreCommand::UpdatePriority { id, priority })?;
            show_result(session, &result, "Priority updated")
        }

        RequestsCommand::Delete { request } => {
            let id = request_id(session, &request);
            if !util::confirm(&format!("Delete request {id}?"), session.yes)? {
                return Ok(());
            }
            match session.apply(CoreCommand::DeleteRequest { id })? {
                CommandResult::Removed(id) => {
                    session.note(&format!("Request deleted: {id}"));
                    Ok(())
                }
                other => Err(unexpected(&other)),
            }
        }

        RequestsCommand::Stats => {
            let stats = session.desk.request_stats();
            let out = output::render_single(session.output, &stats, stats_detail, |s| {
                format!("{} {} {}", s.open, s.in_progress, s.resolved_today)
            })?;
            session.print(&out);
            Ok(())
        }

        RequestsCommand::Export(export) => {
            let snapshot = session.desk.store().requests_snapshot();
            util::export(session, &export, snapshot.as_slice())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn stats_detail_layout() {
        let stats = RequestStats {
            open: 3,
            in_progress: 1,
            resolved_today: 2,
            avg_response_minutes: 42.4,
        };
        insta::assert_snapshot!(stats_detail(&stats), @r"
        Open:              3
        In progress:       1
        Resolved today:    2
        Avg response:      42 min
        ");
    }

    #[test]
    fn assignees_render_by_name() {
        let request: ServiceRequest = serde_json::from_value(serde_json::json!({
            "id": "REQ-7",
            "guestName": "Ana Lima",
            "roomNumber": "204",
            "serviceType": "Laundry",
            "requestedAt": "2026-10-16T08:00:00Z",
            "assignedStaffIds": ["STF-9"]
        }))
        .unwrap();
        assert_eq!(assignee_names(&request, &[]), "STF-9");

        let staff: StaffMember = serde_json::from_value(serde_json::json!({
            "id": "STF-9", "name": "Rosa Diaz"
        }))
        .unwrap();
        assert_eq!(assignee_names(&request, &[Arc::new(staff)]), "Rosa Diaz");

        let unassigned = ServiceRequest {
            assigned_staff_ids: Vec::new(),
            ..request
        };
        assert_eq!(assignee_names(&unassigned, &[]), "-");
    }
}
