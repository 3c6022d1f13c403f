// SPDX-License-Identifier: MIT OR Apache-2.0

use promise_room_core::{PromiseId, PromiseRecord};
use serde::{Deserialize, Serialize};

/// A change pushed to live subscribers of a promise store.
///
/// `Updated` carries the full record as confirmed by the store after the mutation; consumers
/// replace their cached copy with it instead of re-applying the mutation locally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StoreEvent {
    Created(PromiseRecord),
    Updated(PromiseRecord),
    Deleted(PromiseId),
}

impl StoreEvent {
    /// The id of the record this event concerns.
    pub fn id(&self) -> &PromiseId {
        match self {
            StoreEvent::Created(record) => &record.id,
            StoreEvent::Updated(record) => &record.id,
            StoreEvent::Deleted(id) => id,
        }
    }
}
