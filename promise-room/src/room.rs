// SPDX-License-Identifier: MIT OR Apache-2.0

//! The top-level handle tying identity, access control, membership and the feed together.
use promise_room_auth::sessions::MemorySessions;
use promise_room_auth::{resolver, RoomError, RoomManager, Session, SessionProvider};
use promise_room_core::{Identity, Location, PromiseDraft, PromiseId};
use promise_room_store::{MemoryStore, PromiseStore, SubscribableStore};
use tracing::{debug, warn};

use crate::builder::PromiseRoomBuilder;
use crate::feed::Dashboard;
use crate::places::{NoPlaceLookup, PlaceLookup};
use crate::view::PromiseView;

/// One caller's entry point to the promise room.
///
/// The handle resolves the caller's identity freshly for every operation, so signing in or out
/// between calls takes effect immediately. Each opened promise carries its own [`PromiseView`]
/// with its own access gate; unlocking one promise says nothing about another.
#[derive(Debug)]
pub struct PromiseRoom<S, A, P> {
    manager: RoomManager<S>,
    sessions: A,
    places: P,
    anonymous_name: Option<String>,
}

impl PromiseRoom<MemoryStore, MemorySessions, NoPlaceLookup> {
    pub fn builder() -> PromiseRoomBuilder<MemoryStore, MemorySessions, NoPlaceLookup> {
        PromiseRoomBuilder::default()
    }
}

impl<S, A, P> PromiseRoom<S, A, P>
where
    S: PromiseStore + SubscribableStore,
    A: SessionProvider,
    P: PlaceLookup,
{
    pub(crate) fn new(
        manager: RoomManager<S>,
        sessions: A,
        places: P,
        anonymous_name: Option<String>,
    ) -> Self {
        Self {
            manager,
            sessions,
            places,
            anonymous_name,
        }
    }

    /// The caller's current identity, if any.
    pub async fn current_identity(&self) -> Result<Option<Identity>, RoomError> {
        resolver::resolve_current(&self.sessions, self.anonymous_name.as_deref()).await
    }

    async fn require_identity(&self) -> Result<Identity, RoomError> {
        self.current_identity()
            .await?
            .ok_or(RoomError::Unauthenticated)
    }

    /// Sign the caller in through the session provider.
    pub async fn sign_in(&mut self) -> Result<Session, RoomError> {
        self.sessions
            .sign_in()
            .await
            .map_err(|err| RoomError::StoreUnavailable(err.to_string()))
    }

    /// Sign the caller out. Legacy anonymous identity, when configured, remains usable.
    pub async fn sign_out(&mut self) -> Result<(), RoomError> {
        self.sessions
            .sign_out()
            .await
            .map_err(|err| RoomError::StoreUnavailable(err.to_string()))
    }

    /// Create a promise from the draft, geocoding its meeting place when the lookup knows it.
    ///
    /// The caller becomes the creator and sole initial participant. Requires an identity; drafts
    /// are validated before anything reaches the store.
    pub async fn create_promise(&mut self, draft: &PromiseDraft) -> Result<PromiseId, RoomError> {
        let identity = self.require_identity().await?;
        let location = self.locate(&draft.location).await;

        self.manager.create(draft, &identity, location).await
    }

    /// Geocode a location label. Lookup failures never block creation; the promise then carries
    /// the label without coordinates.
    async fn locate(&self, label: &str) -> Option<Location> {
        match self.places.search_place(label).await {
            Ok(Some(place)) => Some(Location {
                label: place.label,
                lat: Some(place.lat),
                lng: Some(place.lng),
                place_id: place.place_id,
            }),
            Ok(None) => None,
            Err(err) => {
                warn!(%err, label, "place lookup failed, keeping the plain label");
                None
            }
        }
    }

    /// The dashboard feed over all promises, newest first.
    ///
    /// Prefers a live subscription; when the subscription cannot be established the feed degrades
    /// to a one-shot read and reports `is_live() == false`.
    pub async fn dashboard(&self) -> Result<Dashboard, RoomError> {
        match self.manager.store().subscribe().await {
            Ok(subscription) => Ok(Dashboard::live(subscription.snapshot, subscription.events)),
            Err(err) => {
                warn!(%err, "live subscription failed, falling back to a one-shot read");
                let promises = self
                    .manager
                    .store()
                    .all_promises()
                    .await
                    .map_err(|err| RoomError::StoreUnavailable(err.to_string()))?;

                Ok(Dashboard::fallback(promises))
            }
        }
    }

    /// Open a promise as the current caller.
    ///
    /// The returned view is unlocked for creators and existing participants; everyone else has to
    /// submit the promise's password first.
    pub async fn open_promise(&self, id: &PromiseId) -> Result<PromiseView, RoomError> {
        let identity = self.require_identity().await?;
        let record = self.manager.fetch(id).await?;
        debug!(%id, caller = %identity, "opened promise");

        Ok(PromiseView::new(record, identity))
    }

    /// Join the promise behind the view. The view must be unlocked; on success it is refreshed
    /// from the record as confirmed by the store.
    pub async fn join(&mut self, view: &mut PromiseView) -> Result<(), RoomError> {
        let confirmed = self
            .manager
            .join(view.record(), view.identity(), view.gate())
            .await?;
        view.refresh(confirmed);

        Ok(())
    }

    /// Leave the promise behind the view. The view must be unlocked; on success it is refreshed
    /// from the record as confirmed by the store.
    pub async fn leave(&mut self, view: &mut PromiseView) -> Result<(), RoomError> {
        let confirmed = self
            .manager
            .leave(view.record(), view.identity(), view.gate())
            .await?;
        view.refresh(confirmed);

        Ok(())
    }

    /// Delete the promise behind the view, permanently. Only its creator may; the view is
    /// consumed since the record it showed no longer exists.
    pub async fn delete_promise(&mut self, view: PromiseView) -> Result<(), RoomError> {
        self.manager
            .delete(view.record(), view.identity(), view.gate())
            .await
    }
}
