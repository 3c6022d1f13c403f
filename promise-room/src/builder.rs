// SPDX-License-Identifier: MIT OR Apache-2.0

use promise_room_auth::sessions::MemorySessions;
use promise_room_auth::{RoomManager, SessionProvider};
use promise_room_store::{MemoryStore, PromiseStore, SubscribableStore};

use crate::places::{NoPlaceLookup, PlaceLookup};
use crate::room::PromiseRoom;

/// Configures and assembles a [`PromiseRoom`].
///
/// Starts from in-memory defaults: a fresh [`MemoryStore`], a signed-out [`MemorySessions`] and
/// no place lookup. Swap in other realisations of the seams as needed; several rooms sharing one
/// cloned store behave like several browsers against the same backend.
#[derive(Debug)]
pub struct PromiseRoomBuilder<S, A, P> {
    store: S,
    sessions: A,
    places: P,
    anonymous_name: Option<String>,
}

impl Default for PromiseRoomBuilder<MemoryStore, MemorySessions, NoPlaceLookup> {
    fn default() -> Self {
        Self {
            store: MemoryStore::new(),
            sessions: MemorySessions::signed_out(),
            places: NoPlaceLookup,
            anonymous_name: None,
        }
    }
}

impl<S, A, P> PromiseRoomBuilder<S, A, P> {
    /// Use this store instead of a fresh in-memory one.
    pub fn store<S2>(self, store: S2) -> PromiseRoomBuilder<S2, A, P> {
        PromiseRoomBuilder {
            store,
            sessions: self.sessions,
            places: self.places,
            anonymous_name: self.anonymous_name,
        }
    }

    /// Use this session provider.
    pub fn sessions<A2>(self, sessions: A2) -> PromiseRoomBuilder<S, A2, P> {
        PromiseRoomBuilder {
            store: self.store,
            sessions,
            places: self.places,
            anonymous_name: self.anonymous_name,
        }
    }

    /// Use this place lookup.
    pub fn places<P2>(self, places: P2) -> PromiseRoomBuilder<S, A, P2> {
        PromiseRoomBuilder {
            store: self.store,
            sessions: self.sessions,
            places,
            anonymous_name: self.anonymous_name,
        }
    }

    /// Legacy anonymous display name, kept from deployments predating the sign-in provider. Only
    /// consulted when no session exists.
    pub fn anonymous_name(mut self, name: &str) -> Self {
        self.anonymous_name = Some(name.to_string());
        self
    }

    pub fn build(self) -> PromiseRoom<S, A, P>
    where
        S: PromiseStore + SubscribableStore,
        A: SessionProvider,
        P: PlaceLookup,
    {
        PromiseRoom::new(
            RoomManager::new(self.store),
            self.sessions,
            self.places,
            self.anonymous_name,
        )
    }
}
