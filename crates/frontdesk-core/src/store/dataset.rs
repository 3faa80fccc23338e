// ── Dataset load / dump ──
//
// A `Dataset` is the injected initial state: one array per record kind,
// every array optional. Loading upserts the incoming records and then
// prunes anything the dataset no longer contains, so a reload never
// passes through an empty state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::DataStore;
use super::collection::EntityCollection;
use crate::model::{
    BankTransaction, Campaign, EntityId, EquityClass, Guest, Identified, Invoice, JournalEntry,
    Lead, Payment, Rate, Room, ServiceRequest, Shareholder, StaffMember,
};

/// Serializable form of the whole store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    pub requests: Vec<ServiceRequest>,
    pub staff: Vec<StaffMember>,
    pub journal_entries: Vec<JournalEntry>,
    pub guests: Vec<Guest>,
    pub rooms: Vec<Room>,
    pub rates: Vec<Rate>,
    pub invoices: Vec<Invoice>,
    pub payments: Vec<Payment>,
    pub bank_transactions: Vec<BankTransaction>,
    pub leads: Vec<Lead>,
    pub campaigns: Vec<Campaign>,
    pub equity_classes: Vec<EquityClass>,
    pub shareholders: Vec<Shareholder>,
}

/// Upsert all incoming entities, then prune any existing ids not in the
/// incoming set. This avoids the brief empty state that `clear()` causes.
fn upsert_and_prune<T: Identified + Clone + Send + Sync + 'static>(
    collection: &mut EntityCollection<T>,
    items: Vec<T>,
) {
    let incoming: HashSet<EntityId> = items.iter().map(|e| e.id().clone()).collect();
    for entity in items {
        collection.upsert(entity);
    }
    for existing in collection.ids() {
        if !incoming.contains(&existing) {
            collection.remove(&existing);
        }
    }
}

impl DataStore {
    /// Build a store seeded with `dataset`.
    pub fn from_dataset(dataset: Dataset) -> Self {
        let mut store = Self::new();
        store.load(dataset);
        store
    }

    /// Replace the store contents with `dataset`.
    pub fn load(&mut self, dataset: Dataset) {
        debug!(
            requests = dataset.requests.len(),
            staff = dataset.staff.len(),
            guests = dataset.guests.len(),
            rooms = dataset.rooms.len(),
            invoices = dataset.invoices.len(),
            "loading dataset"
        );
        upsert_and_prune(&mut self.requests, dataset.requests);
        upsert_and_prune(&mut self.staff, dataset.staff);
        upsert_and_prune(&mut self.journal_entries, dataset.journal_entries);
        upsert_and_prune(&mut self.guests, dataset.guests);
        upsert_and_prune(&mut self.rooms, dataset.rooms);
        upsert_and_prune(&mut self.rates, dataset.rates);
        upsert_and_prune(&mut self.invoices, dataset.invoices);
        upsert_and_prune(&mut self.payments, dataset.payments);
        upsert_and_prune(&mut self.bank_transactions, dataset.bank_transactions);
        upsert_and_prune(&mut self.leads, dataset.leads);
        upsert_and_prune(&mut self.campaigns, dataset.campaigns);
        upsert_and_prune(&mut self.equity_classes, dataset.equity_classes);
        upsert_and_prune(&mut self.shareholders, dataset.shareholders);
    }

    /// Owned copy of everything, in collection order.
    pub fn to_dataset(&self) -> Dataset {
        Dataset {
            requests: self.requests.to_vec(),
            staff: self.staff.to_vec(),
            journal_entries: self.journal_entries.to_vec(),
            guests: self.guests.to_vec(),
            rooms: self.rooms.to_vec(),
            rates: self.rates.to_vec(),
            invoices: self.invoices.to_vec(),
            payments: self.payments.to_vec(),
            bank_transactions: self.bank_transactions.to_vec(),
            leads: self.leads.to_vec(),
            campaigns: self.campaigns.to_vec(),
            equity_classes: self.equity_classes.to_vec(),
            shareholders: self.shareholders.to_vec(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn staff(id: &str, name: &str) -> StaffMember {
        StaffMember {
            id: EntityId::from(id),
            name: name.into(),
            role: "Bell".into(),
            is_available: true,
            current_assignments: 0,
        }
    }

    #[test]
    fn load_prunes_records_missing_from_the_dataset() {
        let mut store = DataStore::from_dataset(Dataset {
            staff: vec![staff("s1", "Ana"), staff("s2", "Ben")],
            ..Dataset::default()
        });
        assert_eq!(store.staff_count(), 2);

        store.load(Dataset {
            staff: vec![staff("s2", "Benjamin")],
            ..Dataset::default()
        });
        assert_eq!(store.staff_count(), 1);
        assert_eq!(
            store.staff_by_id(&EntityId::from("s2")).unwrap().name,
            "Benjamin"
        );
    }

    #[test]
    fn dataset_roundtrips_through_store() {
        let dataset = Dataset {
            staff: vec![staff("s1", "Ana"), staff("s2", "Ben")],
            ..Dataset::default()
        };
        let store = DataStore::from_dataset(dataset.clone());
        assert_eq!(store.to_dataset(), dataset);
    }

    #[test]
    fn missing_arrays_default_to_empty() {
        let dataset: Dataset = serde_json::from_str(r#"{"staff": []}"#).unwrap();
        assert!(DataStore::from_dataset(dataset).is_empty());
    }
}
