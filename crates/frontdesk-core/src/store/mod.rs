// ── In-memory data store ──
//
// Insertion-ordered entity storage with push-based change notification.

pub(crate) mod collection;
mod data_store;
mod dataset;

pub use data_store::DataStore;
pub use dataset::Dataset;
