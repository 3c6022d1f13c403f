// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory persistence for promise records.
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use promise_room_core::{IdentityRef, NewPromise, PromiseId, PromiseRecord};
use tokio::sync::broadcast;

use crate::event::StoreEvent;
use crate::traits::{PromiseStore, SubscribableStore, Subscription};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// An in-memory store of promise records.
#[derive(Debug)]
pub struct InnerMemoryStore {
    seq: u64,
    records: HashMap<PromiseId, PromiseRecord>,

    /// Insertion order, oldest first. Creation timestamps have millisecond resolution, so this is
    /// what makes "newest first" stable for records created in the same millisecond.
    order: Vec<PromiseId>,
}

/// An in-memory store of promise records with live change notifications.
///
/// `MemoryStore` supports usage in asynchronous and multi-threaded contexts by wrapping an
/// `InnerMemoryStore` with an `RwLock` and `Arc`. Convenience methods are provided to obtain a
/// read- or write-lock on the underlying store.
///
/// Every mutation publishes a [`StoreEvent`] while still holding the write lock, and
/// subscriptions take their snapshot while holding the read lock, so a subscriber never misses an
/// event between its snapshot and the first receive.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    inner: Arc<RwLock<InnerMemoryStore>>,
    events: broadcast::Sender<StoreEvent>,
}

impl MemoryStore {
    /// Create a new in-memory store.
    pub fn new() -> Self {
        let inner = InnerMemoryStore {
            seq: 0,
            records: HashMap::new(),
            order: Vec::new(),
        };
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            inner: Arc::new(RwLock::new(inner)),
            events,
        }
    }

    /// Obtain a read-lock on the store.
    pub fn read_store(&self) -> RwLockReadGuard<'_, InnerMemoryStore> {
        self.inner
            .read()
            .expect("acquire shared read access on store")
    }

    /// Obtain a write-lock on the store.
    pub fn write_store(&self) -> RwLockWriteGuard<'_, InnerMemoryStore> {
        self.inner
            .write()
            .expect("acquire exclusive write access on store")
    }

    fn publish(&self, event: StoreEvent) {
        // Nobody listening is fine.
        let _ = self.events.send(event);
    }

    fn snapshot(store: &InnerMemoryStore) -> Vec<PromiseRecord> {
        store
            .order
            .iter()
            .rev()
            .filter_map(|id| store.records.get(id).cloned())
            .collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as u64)
        .unwrap_or(0)
}

impl PromiseStore for MemoryStore {
    type Error = Infallible;

    async fn insert_promise(&mut self, fields: NewPromise) -> Result<PromiseId, Self::Error> {
        let mut store = self.write_store();

        store.seq += 1;
        let id = PromiseId::new(format!("{:08x}", store.seq));

        let record = PromiseRecord {
            id: id.clone(),
            title: fields.title,
            date: fields.date,
            time: fields.time,
            location: fields.location,
            penalty: fields.penalty,
            password: fields.password,
            creator: fields.creator,
            participants: fields.participants,
            created_at: unix_millis(),
        };

        store.records.insert(id.clone(), record.clone());
        store.order.push(id.clone());
        self.publish(StoreEvent::Created(record));

        Ok(id)
    }

    async fn get_promise(&self, id: &PromiseId) -> Result<Option<PromiseRecord>, Self::Error> {
        Ok(self.read_store().records.get(id).cloned())
    }

    async fn add_participant(
        &mut self,
        id: &PromiseId,
        references: &[IdentityRef],
    ) -> Result<Option<bool>, Self::Error> {
        let mut store = self.write_store();
        let Some(record) = store.records.get_mut(id) else {
            return Ok(None);
        };

        let mut occurred = false;
        for reference in references {
            if !record.participants.contains(reference) {
                record.participants.push(reference.clone());
                occurred = true;
            }
        }

        if occurred {
            let updated = record.clone();
            self.publish(StoreEvent::Updated(updated));
        }

        Ok(Some(occurred))
    }

    async fn remove_participant(
        &mut self,
        id: &PromiseId,
        references: &[IdentityRef],
    ) -> Result<Option<bool>, Self::Error> {
        let mut store = self.write_store();
        let Some(record) = store.records.get_mut(id) else {
            return Ok(None);
        };

        let before = record.participants.len();
        record
            .participants
            .retain(|reference| !references.contains(reference));
        let occurred = record.participants.len() != before;

        if occurred {
            let updated = record.clone();
            self.publish(StoreEvent::Updated(updated));
        }

        Ok(Some(occurred))
    }

    async fn delete_promise(&mut self, id: &PromiseId) -> Result<bool, Self::Error> {
        let mut store = self.write_store();
        if store.records.remove(id).is_none() {
            return Ok(false);
        }
        store.order.retain(|entry| entry != id);
        self.publish(StoreEvent::Deleted(id.clone()));

        Ok(true)
    }

    async fn all_promises(&self) -> Result<Vec<PromiseRecord>, Self::Error> {
        Ok(Self::snapshot(&self.read_store()))
    }
}

impl SubscribableStore for MemoryStore {
    type Error = Infallible;

    async fn subscribe(&self) -> Result<Subscription, Self::Error> {
        let store = self.read_store();
        let events = self.events.subscribe();
        let snapshot = Self::snapshot(&store);

        Ok(Subscription { snapshot, events })
    }
}
