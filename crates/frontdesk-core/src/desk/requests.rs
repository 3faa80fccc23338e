// ── Service request workflows ──
//
// Lifecycle: Open -> In Progress -> {Resolved, Cancelled}. Every
// transition appends to the request's activity log. Assignment never
// touches `current_assignments`; that figure belongs to the data source.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::Desk;
use crate::command::NewServiceRequest;
use crate::error::CoreError;
use crate::model::{
    ActivityAction, EntityId, Priority, RequestStatus, ServiceRequest, StaffMember,
};
use crate::validation::ValidationErrors;
use crate::view::{self, Page, RequestColumn, RequestFilter, RequestStats, TableState};

impl Desk {
    fn require_request(&self, id: &EntityId) -> Result<Arc<ServiceRequest>, CoreError> {
        self.store
            .request_by_id(id)
            .ok_or_else(|| CoreError::not_found("Request", id))
    }

    fn ensure_transition(
        request: &ServiceRequest,
        to: RequestStatus,
    ) -> Result<(), CoreError> {
        if request.status.can_transition_to(to) {
            Ok(())
        } else {
            warn!(request = %request.id, from = %request.status, to = %to, "rejected transition");
            Err(CoreError::InvalidTransition {
                request_id: request.id.to_string(),
                from: request.status,
                to,
            })
        }
    }

    /// Apply `f` to the stored request and return the updated copy.
    fn update_request(
        &mut self,
        id: &EntityId,
        f: impl FnOnce(&mut ServiceRequest),
    ) -> Result<ServiceRequest, CoreError> {
        self.store
            .requests
            .update(id, |r| {
                f(r);
                r.clone()
            })
            .ok_or_else(|| CoreError::not_found("Request", id))
    }

    fn staff_name(&self, id: &EntityId) -> String {
        self.store
            .staff_by_id(id)
            .map_or_else(|| id.to_string(), |s| s.name.clone())
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Create a request: status Open, stamped now, with a "Created" entry.
    pub fn add_request(&mut self, data: NewServiceRequest) -> Result<ServiceRequest, CoreError> {
        data.validate().into_result()?;
        let id = data.id.unwrap_or_else(EntityId::generate);
        if self.store.requests.contains(&id) {
            let mut errors = ValidationErrors::new();
            errors.add("id", format!("A request with id {id} already exists"));
            return Err(errors.into());
        }

        let now = self.clock.now();
        let mut request = ServiceRequest {
            id: id.clone(),
            guest_name: data.guest_name.trim().to_owned(),
            room_number: data.room_number.trim().to_owned(),
            service_type: data.service_type,
            priority: data.priority,
            status: RequestStatus::Open,
            requested_at: now,
            eta: data.eta,
            assigned_staff_ids: Vec::new(),
            notes: data.notes,
            attachment: data.attachment,
            activity: Vec::new(),
            completed_at: None,
        };
        request.record(
            ActivityAction::Created,
            now,
            format!("{} requested for room {}", request.service_type, request.room_number),
        );

        self.store.requests.upsert(request.clone());
        info!(request = %id, priority = %request.priority, "request created");
        Ok(request)
    }

    /// Replace the assignee list. Status is unchanged and capacity is not checked.
    pub fn assign_request(
        &mut self,
        id: &EntityId,
        staff_ids: &[EntityId],
    ) -> Result<ServiceRequest, CoreError> {
        self.require_request(id)?;

        let mut assignees: Vec<EntityId> = Vec::with_capacity(staff_ids.len());
        for staff_id in staff_ids {
            if self.store.staff_by_id(staff_id).is_none() {
                warn!(request = %id, staff = %staff_id, "unknown staff member");
                return Err(CoreError::not_found("Staff member", staff_id));
            }
            if !assignees.contains(staff_id) {
                assignees.push(staff_id.clone());
            }
        }

        let details = if assignees.is_empty() {
            "Unassigned".to_owned()
        } else {
            let names: Vec<String> = assignees.iter().map(|s| self.staff_name(s)).collect();
            format!("Assigned to {}", names.join(", "))
        };
        let now = self.clock.now();
        let updated = self.update_request(id, |r| {
            r.assigned_staff_ids = assignees;
            r.record(ActivityAction::Assigned, now, details);
        })?;
        debug!(request = %id, assignees = updated.assigned_staff_ids.len(), "request assigned");
        Ok(updated)
    }

    /// Move to In Progress. Requires at least one assignee.
    pub fn start_request(
        &mut self,
        id: &EntityId,
        staff_id: Option<&EntityId>,
    ) -> Result<ServiceRequest, CoreError> {
        let request = self.require_request(id)?;
        if !request.is_assigned() {
            warn!(request = %id, "start rejected: nobody assigned");
            return Err(CoreError::NoStaffAssigned {
                request_id: id.to_string(),
            });
        }
        Self::ensure_transition(&request, RequestStatus::InProgress)?;

        let staff_id = match staff_id {
            Some(s) if request.is_assigned_to(s) => s.clone(),
            Some(s) => {
                let mut errors = ValidationErrors::new();
                errors.add("staffId", format!("{s} is not assigned to this request"));
                return Err(errors.into());
            }
            None => request.assigned_staff_ids[0].clone(),
        };
        let details = format!("Started by {}", self.staff_name(&staff_id));

        let now = self.clock.now();
        let updated = self.update_request(id, |r| {
            r.status = RequestStatus::InProgress;
            r.record(ActivityAction::Started, now, details);
        })?;
        info!(request = %id, staff = %staff_id, "request started");
        Ok(updated)
    }

    /// Mark Resolved. Open requests may be resolved directly; resolving an
    /// already resolved request changes nothing.
    pub fn resolve_request(
        &mut self,
        id: &EntityId,
        note: &str,
    ) -> Result<ServiceRequest, CoreError> {
        let request = self.require_request(id)?;
        if request.status == RequestStatus::Resolved {
            debug!(request = %id, "already resolved");
            return Ok((*request).clone());
        }
        Self::ensure_transition(&request, RequestStatus::Resolved)?;

        let details = if note.trim().is_empty() {
            "Resolved".to_owned()
        } else {
            note.trim().to_owned()
        };
        let now = self.clock.now();
        let updated = self.update_request(id, |r| {
            r.status = RequestStatus::Resolved;
            r.completed_at.get_or_insert(now);
            r.record(ActivityAction::Resolved, now, details);
        })?;
        info!(request = %id, "request resolved");
        Ok(updated)
    }

    pub fn cancel_request(
        &mut self,
        id: &EntityId,
        reason: &str,
    ) -> Result<ServiceRequest, CoreError> {
        let request = self.require_request(id)?;
        Self::ensure_transition(&request, RequestStatus::Cancelled)?;

        let details = if reason.trim().is_empty() {
            "Cancelled".to_owned()
        } else {
            reason.trim().to_owned()
        };
        let now = self.clock.now();
        let updated = self.update_request(id, |r| {
            r.status = RequestStatus::Cancelled;
            r.record(ActivityAction::Cancelled, now, details);
        })?;
        info!(request = %id, "request cancelled");
        Ok(updated)
    }

    /// Overwrite the priority in any status.
    pub fn update_priority(
        &mut self,
        id: &EntityId,
        priority: Priority,
    ) -> Result<ServiceRequest, CoreError> {
        let request = self.require_request(id)?;
        let details = format!("Priority changed from {} to {priority}", request.priority);
        let now = self.clock.now();
        let updated = self.update_request(id, |r| {
            r.priority = priority;
            r.record(ActivityAction::PriorityChanged, now, details);
        })?;
        debug!(request = %id, %priority, "priority updated");
        Ok(updated)
    }

    pub fn delete_request(&mut self, id: &EntityId) -> Result<EntityId, CoreError> {
        let removed = self
            .store
            .requests
            .remove(id)
            .ok_or_else(|| CoreError::not_found("Request", id))?;
        info!(request = %id, "request deleted");
        Ok(removed.id.clone())
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Staff who may take a new assignment under the configured cap.
    pub fn assignable_staff(&self) -> Vec<Arc<StaffMember>> {
        self.store
            .staff_snapshot()
            .iter()
            .filter(|s| s.is_assignable(self.config.assignment_cap))
            .cloned()
            .collect()
    }

    /// Open requests in service order.
    pub fn queue(&self) -> Vec<Arc<ServiceRequest>> {
        view::queue(self.store.requests_snapshot().as_slice())
    }

    pub fn filtered_requests(
        &self,
        filter: &RequestFilter,
        table: &TableState<RequestColumn>,
    ) -> Page<Arc<ServiceRequest>> {
        let snapshot = self.store.requests_snapshot();
        view::build_page(snapshot.as_slice(), |r| filter.matches(r), table)
    }

    pub fn request_stats(&self) -> RequestStats {
        let snapshot = self.store.requests_snapshot();
        RequestStats::compute(snapshot.iter().map(AsRef::as_ref), self.clock.today())
    }
}
