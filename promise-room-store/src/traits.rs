// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for reading, mutating and subscribing to promise records.
use std::fmt::{Debug, Display};

use promise_room_core::{IdentityRef, NewPromise, PromiseId, PromiseRecord};
use tokio::sync::broadcast;

use crate::event::StoreEvent;

/// Interface for storing, mutating and querying promise records.
///
/// Two variants of the trait are provided: one which is thread-safe (implementing `Send`) and one
/// which is purely intended for single-threaded execution contexts.
#[trait_variant::make(PromiseStore: Send)]
pub trait LocalPromiseStore: Clone {
    type Error: Display + Debug;

    /// Insert a new promise record, assigning its id and creation timestamp.
    ///
    /// The initial participant references are written exactly as given; the caller is responsible
    /// for listing the creator's references exactly once.
    async fn insert_promise(&mut self, fields: NewPromise) -> Result<PromiseId, Self::Error>;

    /// Get a promise record.
    ///
    /// Returns `None` when no record with the requested id exists.
    async fn get_promise(&self, id: &PromiseId) -> Result<Option<PromiseRecord>, Self::Error>;

    /// Append participant references to a record as one atomic, duplicate-suppressing set union.
    ///
    /// References already present are silently suppressed, so a doubled submission of the same
    /// references can never produce a duplicate entry.
    ///
    /// Returns `None` when the record was not found, `Some(true)` when at least one reference was
    /// inserted and `Some(false)` when every reference was already present.
    async fn add_participant(
        &mut self,
        id: &PromiseId,
        references: &[IdentityRef],
    ) -> Result<Option<bool>, Self::Error>;

    /// Remove participant references from a record as one atomic set difference.
    ///
    /// Removal matches by value, never by index, so concurrent removals cannot take out the wrong
    /// element.
    ///
    /// Returns `None` when the record was not found, `Some(true)` when at least one reference was
    /// removed and `Some(false)` when none of the references were present.
    async fn remove_participant(
        &mut self,
        id: &PromiseId,
        references: &[IdentityRef],
    ) -> Result<Option<bool>, Self::Error>;

    /// Delete a promise record permanently.
    ///
    /// Returns `true` when the removal occurred and `false` when the record was not found.
    async fn delete_promise(&mut self, id: &PromiseId) -> Result<bool, Self::Error>;

    /// All promise records, ordered by creation time descending.
    async fn all_promises(&self) -> Result<Vec<PromiseRecord>, Self::Error>;
}

/// A live query result: the matching records at subscription time, newest first, plus a receiver
/// for every subsequent change.
#[derive(Debug)]
pub struct Subscription {
    pub snapshot: Vec<PromiseRecord>,
    pub events: broadcast::Receiver<StoreEvent>,
}

/// Interface for live queries over all promise records.
///
/// Two variants of the trait are provided: one which is thread-safe (implementing `Send`) and one
/// which is purely intended for single-threaded execution contexts.
#[trait_variant::make(SubscribableStore: Send)]
pub trait LocalSubscribableStore {
    type Error: Display + Debug;

    /// Subscribe to all promise records.
    async fn subscribe(&self) -> Result<Subscription, Self::Error>;
}
