// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dashboard feed: every promise, newest first, kept current by store pushes.
use promise_room_core::PromiseRecord;
use promise_room_store::StoreEvent;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

/// A snapshot of all promises plus, when the live subscription came up, a stream of changes.
///
/// The local list is only ever updated from events the store confirmed and pushed; the feed never
/// applies a caller's own mutation optimistically. Dropping the feed drops its receiver, so
/// changes arriving after teardown go nowhere instead of mutating discarded state.
#[derive(Debug)]
pub struct Dashboard {
    promises: Vec<PromiseRecord>,
    events: Option<broadcast::Receiver<StoreEvent>>,
}

impl Dashboard {
    pub(crate) fn live(promises: Vec<PromiseRecord>, events: broadcast::Receiver<StoreEvent>) -> Self {
        Self {
            promises,
            events: Some(events),
        }
    }

    pub(crate) fn fallback(promises: Vec<PromiseRecord>) -> Self {
        Self {
            promises,
            events: None,
        }
    }

    /// All promises, newest first.
    pub fn promises(&self) -> &[PromiseRecord] {
        &self.promises
    }

    /// Return true when this feed receives live changes. A feed served by the one-shot fallback
    /// read stays at its snapshot.
    pub fn is_live(&self) -> bool {
        self.events.is_some()
    }

    /// Wait for the next store change, fold it into the local list and return it.
    ///
    /// Returns `None` once the feed can no longer change: it was served by the fallback read, the
    /// store closed the event channel, or the receiver lagged behind and lost events. A lagged
    /// feed drops to `is_live() == false`; resubscribe for a fresh snapshot.
    pub async fn changed(&mut self) -> Option<StoreEvent> {
        let events = self.events.as_mut()?;

        match events.recv().await {
            Ok(event) => {
                self.apply(&event);
                Some(event)
            }
            // Missed events cannot be replayed; a missed delete would leave the local list
            // showing a record the store no longer has. Stop at the stale snapshot.
            Err(RecvError::Lagged(_)) | Err(RecvError::Closed) => {
                self.events = None;
                None
            }
        }
    }

    fn apply(&mut self, event: &StoreEvent) {
        match event {
            StoreEvent::Created(record) => {
                self.promises.insert(0, record.clone());
            }
            StoreEvent::Updated(record) => {
                if let Some(existing) = self.promises.iter_mut().find(|p| p.id == record.id) {
                    *existing = record.clone();
                }
            }
            StoreEvent::Deleted(id) => {
                self.promises.retain(|p| p.id != *id);
            }
        }
    }

    /// Split the feed into upcoming and past promises relative to `now`, given as a
    /// `YYYY-MM-DD HH:MM` sort key. Promises starting exactly at `now` count as upcoming.
    pub fn split_by_start(&self, now: &str) -> (Vec<&PromiseRecord>, Vec<&PromiseRecord>) {
        self.promises
            .iter()
            .partition(|promise| promise.starts_at().as_str() >= now)
    }
}
