// ── Desk facade ──
//
// The single writer over the `DataStore`. Commands mutate through
// `execute()`; reads go straight to snapshots or derived views. Each
// workflow area lives in its own file as a further `impl Desk` block.

mod accounting;
mod operations;
mod reports;
mod requests;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::command::{Command, CommandResult};
use crate::config::DeskConfig;
use crate::error::CoreError;
use crate::store::{DataStore, Dataset};

pub use reports::DeskSummary;

/// Owns the store, the clock and the business-rule tuning.
pub struct Desk {
    store: DataStore,
    clock: Arc<dyn Clock>,
    config: DeskConfig,
}

impl fmt::Debug for Desk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Desk")
            .field("config", &self.config)
            .field("requests", &self.store.request_count())
            .finish_non_exhaustive()
    }
}

impl Desk {
    /// Desk over `dataset` with wall-clock time and default tuning.
    pub fn new(dataset: Dataset) -> Self {
        Self::with_clock(dataset, Arc::new(SystemClock), DeskConfig::default())
    }

    pub fn with_clock(dataset: Dataset, clock: Arc<dyn Clock>, config: DeskConfig) -> Self {
        Self {
            store: DataStore::from_dataset(dataset),
            clock,
            config,
        }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Owned copy of the current state, ready to be written back out.
    pub fn to_dataset(&self) -> Dataset {
        self.store.to_dataset()
    }

    /// Route a command to its workflow.
    pub fn execute(&mut self, cmd: Command) -> Result<CommandResult, CoreError> {
        debug!(command = cmd.describe(), "executing command");
        match cmd {
            // ── Service requests ─────────────────────────────────────
            Command::AddRequest(data) => self.add_request(data).map(CommandResult::Request),
            Command::AssignRequest { id, staff_ids } => self
                .assign_request(&id, &staff_ids)
                .map(CommandResult::Request),
            Command::StartRequest { id, staff_id } => self
                .start_request(&id, staff_id.as_ref())
                .map(CommandResult::Request),
            Command::ResolveRequest { id, note } => self
                .resolve_request(&id, &note)
                .map(CommandResult::Request),
            Command::CancelRequest { id, reason } => self
                .cancel_request(&id, &reason)
                .map(CommandResult::Request),
            Command::UpdatePriority { id, priority } => self
                .update_priority(&id, priority)
                .map(CommandResult::Request),
            Command::DeleteRequest { id } => self.delete_request(&id).map(CommandResult::Removed),

            // ── Journal ──────────────────────────────────────────────
            Command::SubmitJournalEntry(draft) => self
                .submit_journal_entry(&draft)
                .map(CommandResult::JournalEntry),
            Command::PostJournalEntry { id } => self
                .post_journal_entry(&id)
                .map(CommandResult::JournalEntry),

            // ── Rooms & guests ───────────────────────────────────────
            Command::SetHousekeeping {
                room_number,
                status,
                housekeeper,
            } => self
                .set_housekeeping(&room_number, status, housekeeper)
                .map(CommandResult::Room),
            Command::CheckInGuest { id, room_number } => self
                .check_in_guest(&id, room_number.as_deref())
                .map(CommandResult::Guest),
            Command::CheckOutGuest { id } => self.check_out_guest(&id).map(CommandResult::Guest),

            // ── Banking ──────────────────────────────────────────────
            Command::RecordPayment(data) => self.record_payment(data).map(CommandResult::Payment),
            Command::ReconcileTransaction {
                transaction_id,
                payment_id,
            } => self
                .reconcile(&transaction_id, &payment_id)
                .map(CommandResult::BankTransaction),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use chrono::{DateTime, TimeZone, Utc};

    use super::Desk;
    use crate::clock::ManualClock;
    use crate::config::DeskConfig;
    use crate::model::{EntityId, StaffMember};
    use crate::store::Dataset;

    #[allow(clippy::unwrap_used)]
    pub(crate) fn start_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap()
    }

    pub(crate) fn staff(id: &str, name: &str, is_available: bool, assignments: u32) -> StaffMember {
        StaffMember {
            id: EntityId::from(id),
            name: name.into(),
            role: "Housekeeping".into(),
            is_available,
            current_assignments: assignments,
        }
    }

    /// Desk on a manual clock, so tests can move time forward.
    pub(crate) fn desk_with(dataset: Dataset) -> (Desk, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start_time()));
        let desk = Desk::with_clock(dataset, clock.clone(), DeskConfig::default());
        (desk, clock)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::test_support::{desk_with, staff};
    use super::*;
    use crate::command::NewServiceRequest;
    use crate::model::{EntityId, RequestStatus, ServiceType};

    #[test]
    fn execute_routes_request_lifecycle() {
        let (mut desk, _clock) = desk_with(Dataset {
            staff: vec![staff("STF-1", "Rosa", true, 0)],
            ..Dataset::default()
        });

        let CommandResult::Request(created) = desk
            .execute(Command::AddRequest(NewServiceRequest::new(
                "J. Doe",
                "204",
                ServiceType::Laundry,
            )))
            .unwrap()
        else {
            panic!("expected a request");
        };
        let id = created.id.clone();

        desk.execute(Command::AssignRequest {
            id: id.clone(),
            staff_ids: vec![EntityId::from("STF-1")],
        })
        .unwrap();
        desk.execute(Command::StartRequest {
            id: id.clone(),
            staff_id: None,
        })
        .unwrap();
        let result = desk
            .execute(Command::ResolveRequest {
                id: id.clone(),
                note: "Delivered".into(),
            })
            .unwrap();

        let CommandResult::Request(resolved) = result else {
            panic!("expected a request");
        };
        assert_eq!(resolved.status, RequestStatus::Resolved);
        assert_eq!(resolved.activity.len(), 4);

        assert_eq!(
            desk.execute(Command::DeleteRequest { id: id.clone() })
                .unwrap(),
            CommandResult::Removed(id)
        );
        assert_eq!(desk.store().request_count(), 0);
    }

    #[test]
    fn dataset_survives_a_round_trip_through_the_desk() {
        let dataset = Dataset {
            staff: vec![staff("STF-1", "Rosa", true, 0)],
            ..Dataset::default()
        };
        let (desk, _clock) = desk_with(dataset.clone());
        assert_eq!(desk.to_dataset(), dataset);
    }

    #[tokio::test]
    async fn subscribers_see_each_new_request() {
        let (mut desk, _clock) = desk_with(Dataset::default());
        let mut requests = desk.store().subscribe_requests();
        assert!(requests.current().is_empty());

        desk.add_request(NewServiceRequest::new("J. Doe", "204", ServiceType::Laundry))
            .unwrap();
        let snapshot = requests.changed().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].guest_name, "J. Doe");
        assert!(!requests.has_changed());
    }

    #[test]
    fn changed_stays_pending_until_a_mutation() {
        let (mut desk, _clock) = desk_with(Dataset {
            staff: vec![staff("STF-1", "Rosa", true, 0)],
            ..Dataset::default()
        });
        let created = desk
            .add_request(NewServiceRequest::new("A. Lee", "310", ServiceType::RoomService))
            .unwrap();
        let mut requests = desk.store().subscribe_requests();

        let mut changed = tokio_test::task::spawn(requests.changed());
        tokio_test::assert_pending!(changed.poll());

        desk.assign_request(&created.id, &[EntityId::from("STF-1")])
            .unwrap();
        assert!(changed.is_woken());
        let snapshot = tokio_test::assert_ready!(changed.poll()).unwrap();
        assert_eq!(snapshot[0].assigned_staff_ids, vec![EntityId::from("STF-1")]);
    }
}
