// ── Change subscriptions ──
//
// A dashboard holds one `EntityStream` per panel and re-derives its view
// (queue, stats, occupancy) whenever the collection behind it changes.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// Every record of one kind, in store order, as of some mutation.
pub type Snapshot<T> = Arc<Vec<Arc<T>>>;

/// Subscription to one record collection in the `DataStore`.
pub struct EntityStream<T: Clone + Send + Sync + 'static> {
    seen: Snapshot<T>,
    rx: watch::Receiver<Snapshot<T>>,
}

impl<T: Clone + Send + Sync + 'static> EntityStream<T> {
    pub(crate) fn new(rx: watch::Receiver<Snapshot<T>>) -> Self {
        let seen = Arc::clone(&rx.borrow());
        Self { seen, rx }
    }

    /// The records as of subscription, or as of the last `changed()`.
    pub fn current(&self) -> &Snapshot<T> {
        &self.seen
    }

    /// Whatever the store holds right now, without marking it seen.
    pub fn latest(&self) -> Snapshot<T> {
        Arc::clone(&self.rx.borrow())
    }

    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Resolves after the next mutation with the new records.
    /// `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<Snapshot<T>> {
        self.rx.changed().await.ok()?;
        self.seen = Arc::clone(&self.rx.borrow_and_update());
        Some(Arc::clone(&self.seen))
    }

    /// The current records first, then one item per mutation.
    pub fn into_stream(self) -> SnapshotStream<T> {
        SnapshotStream {
            inner: WatchStream::new(self.rx),
        }
    }
}

pub struct SnapshotStream<T: Clone + Send + Sync + 'static> {
    inner: WatchStream<Snapshot<T>>,
}

impl<T: Clone + Send + Sync + 'static> Stream for SnapshotStream<T> {
    type Item = Snapshot<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tokio_stream::StreamExt;

    use crate::model::{EntityId, StaffMember};
    use crate::store::collection::EntityCollection;

    use super::*;

    fn staff(id: &str, name: &str) -> StaffMember {
        StaffMember {
            id: EntityId::from(id),
            name: name.into(),
            role: "Front Desk".into(),
            is_available: true,
            current_assignments: 0,
        }
    }

    #[tokio::test]
    async fn stream_yields_current_then_each_mutation() {
        let mut roster = EntityCollection::new();
        roster.upsert(staff("STF-1", "Rosa"));

        let mut stream = EntityStream::new(roster.subscribe()).into_stream();
        assert_eq!(stream.next().await.unwrap().len(), 1);

        roster.upsert(staff("STF-2", "Tom"));
        let names: Vec<String> = stream
            .next()
            .await
            .unwrap()
            .iter()
            .map(|s| s.name.clone())
            .collect();
        assert_eq!(names, ["Rosa", "Tom"]);
    }

    #[test]
    fn latest_runs_ahead_of_current() {
        let mut roster = EntityCollection::new();
        let sub = EntityStream::new(roster.subscribe());
        roster.upsert(staff("STF-1", "Rosa"));

        assert!(sub.current().is_empty());
        assert_eq!(sub.latest().len(), 1);
        assert!(sub.has_changed());
    }
}
