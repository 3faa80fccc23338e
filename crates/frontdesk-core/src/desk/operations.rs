// ── Rooms, housekeeping and guest stays ──

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::Desk;
use crate::error::CoreError;
use crate::model::{
    EntityId, Guest, GuestStatus, HousekeepingStatus, Rate, Room, RoomStatus, RoomSummary,
};
use crate::validation::ValidationErrors;
use crate::view::{
    self, GuestColumn, GuestFilter, Page, RateColumn, RoomColumn, TableState,
};

fn rejected(field: &str, message: String) -> CoreError {
    let mut errors = ValidationErrors::new();
    errors.add(field, message);
    errors.into()
}

impl Desk {
    fn require_guest(&self, id: &EntityId) -> Result<Arc<Guest>, CoreError> {
        self.store
            .guests
            .get(id)
            .ok_or_else(|| CoreError::not_found("Guest", id))
    }

    fn require_room(&self, number: &str) -> Result<Arc<Room>, CoreError> {
        self.store
            .room_by_number(number)
            .ok_or_else(|| CoreError::not_found("Room", number))
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Update a room's housekeeping state. Marking it Clean stamps `last_cleaned`.
    pub fn set_housekeeping(
        &mut self,
        room_number: &str,
        status: HousekeepingStatus,
        housekeeper: Option<EntityId>,
    ) -> Result<Room, CoreError> {
        let room = self.require_room(room_number)?;
        if let Some(staff_id) = &housekeeper {
            if self.store.staff_by_id(staff_id).is_none() {
                return Err(CoreError::not_found("Staff member", staff_id));
            }
        }

        let now = self.clock.now();
        let updated = self
            .store
            .rooms
            .update(&room.id, |r| {
                r.housekeeping = status;
                if status == HousekeepingStatus::Clean {
                    r.last_cleaned = Some(now);
                }
                if housekeeper.is_some() {
                    r.assigned_housekeeper = housekeeper;
                }
                r.clone()
            })
            .ok_or_else(|| CoreError::not_found("Room", room_number))?;
        debug!(room = room_number, %status, "housekeeping updated");
        Ok(updated)
    }

    /// Reserved guest -> Checked In; the room becomes Occupied.
    pub fn check_in_guest(
        &mut self,
        id: &EntityId,
        room_number: Option<&str>,
    ) -> Result<Guest, CoreError> {
        let guest = self.require_guest(id)?;
        if guest.status != GuestStatus::Reserved {
            warn!(guest = %id, status = %guest.status, "check-in rejected");
            return Err(rejected(
                "status",
                format!("Only reserved guests can check in (guest is {})", guest.status),
            ));
        }
        let Some(number) = room_number.or(guest.room_number.as_deref()) else {
            return Err(rejected("roomNumber", "A room is required to check in".into()));
        };
        let room = self.require_room(number)?;
        if !matches!(room.status, RoomStatus::Available | RoomStatus::Reserved) {
            return Err(rejected(
                "roomNumber",
                format!("Room {} is {}", room.number, room.status),
            ));
        }

        let number = room.number.clone();
        self.store
            .rooms
            .update(&room.id, |r| r.status = RoomStatus::Occupied);
        let updated = self
            .store
            .guests
            .update(id, |g| {
                g.status = GuestStatus::CheckedIn;
                g.room_number = Some(number.clone());
                g.clone()
            })
            .ok_or_else(|| CoreError::not_found("Guest", id))?;
        info!(guest = %id, room = %number, "guest checked in");
        Ok(updated)
    }

    /// Checked In -> Checked Out; the room is freed and flagged Dirty.
    pub fn check_out_guest(&mut self, id: &EntityId) -> Result<Guest, CoreError> {
        let guest = self.require_guest(id)?;
        if guest.status != GuestStatus::CheckedIn {
            warn!(guest = %id, status = %guest.status, "check-out rejected");
            return Err(rejected(
                "status",
                format!("Only checked-in guests can check out (guest is {})", guest.status),
            ));
        }

        if let Some(room) = guest
            .room_number
            .as_deref()
            .and_then(|n| self.store.room_by_number(n))
        {
            self.store.rooms.update(&room.id, |r| {
                r.status = RoomStatus::Available;
                r.housekeeping = HousekeepingStatus::Dirty;
            });
        }
        let updated = self
            .store
            .guests
            .update(id, |g| {
                g.status = GuestStatus::CheckedOut;
                g.clone()
            })
            .ok_or_else(|| CoreError::not_found("Guest", id))?;
        info!(guest = %id, "guest checked out");
        Ok(updated)
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn room_summary(&self) -> RoomSummary {
        RoomSummary::from_rooms(self.store.rooms_snapshot().iter().map(AsRef::as_ref))
    }

    /// Rooms waiting for housekeeping, in room order.
    pub fn rooms_needing_cleaning(&self) -> Vec<Arc<Room>> {
        self.store
            .rooms_snapshot()
            .iter()
            .filter(|r| r.needs_cleaning())
            .cloned()
            .collect()
    }

    pub fn arrivals_today(&self) -> Vec<Arc<Guest>> {
        let today = self.clock.today();
        self.store
            .guests_snapshot()
            .iter()
            .filter(|g| g.arrives_on(today))
            .cloned()
            .collect()
    }

    pub fn departures_today(&self) -> Vec<Arc<Guest>> {
        let today = self.clock.today();
        self.store
            .guests_snapshot()
            .iter()
            .filter(|g| g.departs_on(today))
            .cloned()
            .collect()
    }

    pub fn guests_page(
        &self,
        filter: &GuestFilter,
        table: &TableState<GuestColumn>,
    ) -> Page<Arc<Guest>> {
        let snapshot = self.store.guests_snapshot();
        view::build_page(snapshot.as_slice(), |g| filter.matches(g), table)
    }

    pub fn rooms_page(
        &self,
        status: Option<RoomStatus>,
        table: &TableState<RoomColumn>,
    ) -> Page<Arc<Room>> {
        let snapshot = self.store.rooms_snapshot();
        view::build_page(
            snapshot.as_slice(),
            |r| status.is_none_or(|s| r.status == s),
            table,
        )
    }

    /// Rates, optionally limited to those bookable on the clock date.
    pub fn rates_page(&self, current_only: bool, table: &TableState<RateColumn>) -> Page<Arc<Rate>> {
        let today = self.clock.today();
        let snapshot = self.store.rates_snapshot();
        view::build_page(
            snapshot.as_slice(),
            |r| !current_only || r.applies_on(today),
            table,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::super::test_support::{desk_with, staff, start_time};
    use super::*;
    use crate::model::RoomType;
    use crate::store::Dataset;

    fn room(number: &str, status: RoomStatus) -> Room {
        Room {
            id: EntityId::from(format!("RM-{number}")),
            number: number.into(),
            floor: 1,
            room_type: RoomType::Double,
            status,
            housekeeping: HousekeepingStatus::Clean,
            assigned_housekeeper: None,
            last_cleaned: None,
        }
    }

    fn guest(id: &str, status: GuestStatus, room: Option<&str>) -> Guest {
        Guest {
            id: EntityId::from(id),
            name: format!("Guest {id}"),
            email: format!("{id}@example.com"),
            phone: String::new(),
            room_number: room.map(str::to_owned),
            check_in: start_time().date_naive(),
            check_out: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            status,
            vip: false,
            total_spent: 0.0,
        }
    }

    fn desk() -> Desk {
        desk_with(Dataset {
            staff: vec![staff("STF-1", "Rosa", true, 0)],
            rooms: vec![
                room("101", RoomStatus::Available),
                room("102", RoomStatus::Occupied),
                room("103", RoomStatus::OutOfOrder),
            ],
            guests: vec![
                guest("G1", GuestStatus::Reserved, Some("101")),
                guest("G2", GuestStatus::Reserved, None),
                guest("G3", GuestStatus::CheckedIn, Some("102")),
            ],
            ..Dataset::default()
        })
        .0
    }

    #[test]
    fn check_in_occupies_the_room() {
        let mut desk = desk();
        let g = desk.check_in_guest(&EntityId::from("G1"), None).unwrap();
        assert_eq!(g.status, GuestStatus::CheckedIn);
        assert_eq!(
            desk.store().room_by_number("101").unwrap().status,
            RoomStatus::Occupied
        );
    }

    #[test]
    fn check_in_needs_a_free_room() {
        let mut desk = desk();
        let id = EntityId::from("G2");
        assert!(matches!(
            desk.check_in_guest(&id, None),
            Err(CoreError::Validation(e)) if e.contains("roomNumber")
        ));
        assert!(desk.check_in_guest(&id, Some("102")).is_err());
        assert!(desk.check_in_guest(&id, Some("999")).is_err());
    }

    #[test]
    fn check_out_frees_room_and_marks_it_dirty() {
        let mut desk = desk();
        desk.check_out_guest(&EntityId::from("G3")).unwrap();
        let room = desk.store().room_by_number("102").unwrap();
        assert_eq!(room.status, RoomStatus::Available);
        assert_eq!(room.housekeeping, HousekeepingStatus::Dirty);
        assert!(desk.check_out_guest(&EntityId::from("G3")).is_err());
    }

    #[test]
    fn cleaning_stamps_time_and_housekeeper() {
        let mut desk = desk();
        desk.check_out_guest(&EntityId::from("G3")).unwrap();
        assert_eq!(desk.rooms_needing_cleaning().len(), 1);
        let rooms = desk.store().subscribe_rooms();

        let room = desk
            .set_housekeeping("102", HousekeepingStatus::Clean, Some(EntityId::from("STF-1")))
            .unwrap();
        assert_eq!(room.last_cleaned, Some(start_time()));
        assert_eq!(room.assigned_housekeeper, Some(EntityId::from("STF-1")));
        assert!(desk.rooms_needing_cleaning().is_empty());
        assert!(rooms.has_changed());
    }

    #[test]
    fn occupancy_excludes_out_of_order_rooms() {
        let summary = desk().room_summary();
        assert_eq!(summary.total, 3);
        assert!((summary.occupancy_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn arrivals_are_reserved_guests_due_today() {
        let desk = desk();
        assert_eq!(desk.arrivals_today().len(), 2);
        assert!(desk.departures_today().is_empty());
    }
}
