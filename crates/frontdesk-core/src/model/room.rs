// ── Room and housekeeping domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::{EntityId, Identified};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum RoomType {
    Single,
    Double,
    Twin,
    Suite,
    Deluxe,
}

/// Front-office status of a room.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Maintenance,
    #[serde(rename = "Out of Order")]
    #[strum(to_string = "Out of Order", serialize = "out-of-order", serialize = "ooo")]
    OutOfOrder,
}

/// Housekeeping state, tracked separately from the front-office status.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum HousekeepingStatus {
    #[default]
    Clean,
    Dirty,
    Inspected,
    #[serde(rename = "In Progress")]
    #[strum(to_string = "In Progress", serialize = "in-progress")]
    InProgress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: EntityId,
    pub number: String,
    #[serde(default)]
    pub floor: i32,
    pub room_type: RoomType,
    #[serde(default)]
    pub status: RoomStatus,
    #[serde(default)]
    pub housekeeping: HousekeepingStatus,
    #[serde(default)]
    pub assigned_housekeeper: Option<EntityId>,
    #[serde(default)]
    pub last_cleaned: Option<DateTime<Utc>>,
}

impl Room {
    pub fn needs_cleaning(&self) -> bool {
        self.housekeeping == HousekeepingStatus::Dirty && self.status != RoomStatus::OutOfOrder
    }
}

impl Identified for Room {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Occupancy and housekeeping roll-up across all rooms.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub total: usize,
    pub available: usize,
    pub occupied: usize,
    pub reserved: usize,
    pub maintenance: usize,
    pub out_of_order: usize,
    pub needs_cleaning: usize,
    /// Occupied rooms over sellable rooms (total minus out of order), in percent.
    pub occupancy_pct: f64,
}

impl RoomSummary {
    #[allow(clippy::cast_precision_loss)]
    pub fn from_rooms<'a>(rooms: impl IntoIterator<Item = &'a Room>) -> Self {
        let mut summary = Self::default();
        for room in rooms {
            summary.total += 1;
            match room.status {
                RoomStatus::Available => summary.available += 1,
                RoomStatus::Occupied => summary.occupied += 1,
                RoomStatus::Reserved => summary.reserved += 1,
                RoomStatus::Maintenance => summary.maintenance += 1,
                RoomStatus::OutOfOrder => summary.out_of_order += 1,
            }
            if room.needs_cleaning() {
                summary.needs_cleaning += 1;
            }
        }
        let sellable = summary.total - summary.out_of_order;
        if sellable > 0 {
            summary.occupancy_pct = summary.occupied as f64 / sellable as f64 * 100.0;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(number: &str, status: RoomStatus, housekeeping: HousekeepingStatus) -> Room {
        Room {
            id: EntityId::from(format!("RM-{number}")),
            number: number.into(),
            floor: 1,
            room_type: RoomType::Double,
            status,
            housekeeping,
            assigned_housekeeper: None,
            last_cleaned: None,
        }
    }

    #[test]
    fn occupancy_excludes_out_of_order_rooms() {
        let rooms = [
            room("101", RoomStatus::Occupied, HousekeepingStatus::Clean),
            room("102", RoomStatus::Available, HousekeepingStatus::Dirty),
            room("103", RoomStatus::OutOfOrder, HousekeepingStatus::Dirty),
            room("104", RoomStatus::Available, HousekeepingStatus::Clean),
        ];
        let summary = RoomSummary::from_rooms(&rooms);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.out_of_order, 1);
        assert_eq!(summary.needs_cleaning, 1);
        assert!((summary.occupancy_pct - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_property_has_zero_occupancy() {
        let summary = RoomSummary::from_rooms(&Vec::<Room>::new());
        assert!(summary.occupancy_pct.abs() < 1e-9);
    }
}
