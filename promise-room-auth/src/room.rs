// SPDX-License-Identifier: MIT OR Apache-2.0

//! Membership and lifecycle operations on promise records.
use std::fmt::Display;

use promise_room_core::{
    CreatorRef, Identity, IdentityRef, Location, NewPromise, PromiseDraft, PromiseId,
    PromiseRecord,
};
use promise_room_store::PromiseStore;
use tracing::debug;

use crate::access::AccessGate;
use crate::error::RoomError;

/// Executes create, join, leave and delete against the store, enforcing caller-specific
/// preconditions.
///
/// All mutations go through the store's atomic union-append and set-difference primitives; the
/// manager never reads, locally modifies and writes back the participant collection. Within one
/// caller's session the access gate must have reached `Unlocked` before any membership or
/// lifecycle operation; the manager rejects such calls even though the surface above it is
/// expected to prevent them.
#[derive(Clone, Debug)]
pub struct RoomManager<S> {
    store: S,
}

impl<S> RoomManager<S>
where
    S: PromiseStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a new promise from a validated draft.
    ///
    /// The creator is implicitly the first participant: their references are written into the
    /// participant set exactly once, at insert time. Identities with an account id are recorded
    /// under both schemes so the record stays resolvable by legacy name-only readers.
    pub async fn create(
        &mut self,
        draft: &PromiseDraft,
        identity: &Identity,
        location: Option<Location>,
    ) -> Result<PromiseId, RoomError> {
        draft.validate()?;

        let fields = NewPromise {
            title: draft.title.clone(),
            date: draft.date.clone(),
            time: draft.time.clone(),
            location: Some(location.unwrap_or_else(|| Location::label_only(&draft.location))),
            penalty: draft.penalty.clone(),
            password: draft.password.clone(),
            creator: CreatorRef::from_identity(identity),
            participants: identity.references(),
        };

        let id = self
            .store
            .insert_promise(fields)
            .await
            .map_err(store_unavailable)?;
        debug!(%id, creator = %identity, "created promise");

        Ok(id)
    }

    /// Load a promise record.
    pub async fn fetch(&self, id: &PromiseId) -> Result<PromiseRecord, RoomError> {
        self.store
            .get_promise(id)
            .await
            .map_err(store_unavailable)?
            .ok_or(RoomError::RecordNotFound)
    }

    /// Add the caller to the record's participant set.
    ///
    /// Appends references under the record's own scheme: both kinds for records that already use
    /// account ids, a name reference only for legacy records. Concurrent joins by different
    /// identities are serialised by the store's union primitive; a doubled join by the same
    /// identity is suppressed there and still counts as success. Returns the record as confirmed
    /// by the store after the mutation.
    pub async fn join(
        &mut self,
        record: &PromiseRecord,
        identity: &Identity,
        gate: &AccessGate,
    ) -> Result<PromiseRecord, RoomError> {
        if !gate.is_unlocked() {
            return Err(RoomError::GateLocked);
        }
        if record.is_participant(identity) {
            return Err(RoomError::AlreadyParticipant);
        }

        let references = join_references(record, identity);
        let outcome = self
            .store
            .add_participant(&record.id, &references)
            .await
            .map_err(store_unavailable)?;

        match outcome {
            // A concurrent delete won the race; the record is simply gone.
            None => Err(RoomError::RecordNotFound),
            Some(occurred) => {
                debug!(id = %record.id, participant = %identity, occurred, "joined promise");
                self.fetch(&record.id).await
            }
        }
    }

    /// Remove the caller from the record's participant set.
    ///
    /// Removes every reference the caller may appear under, as one atomic set difference. Returns
    /// the record as confirmed by the store after the mutation.
    pub async fn leave(
        &mut self,
        record: &PromiseRecord,
        identity: &Identity,
        gate: &AccessGate,
    ) -> Result<PromiseRecord, RoomError> {
        if !gate.is_unlocked() {
            return Err(RoomError::GateLocked);
        }
        if !record.is_participant(identity) {
            return Err(RoomError::NotParticipant);
        }

        let outcome = self
            .store
            .remove_participant(&record.id, &identity.references())
            .await
            .map_err(store_unavailable)?;

        match outcome {
            None => Err(RoomError::RecordNotFound),
            Some(occurred) => {
                debug!(id = %record.id, participant = %identity, occurred, "left promise");
                self.fetch(&record.id).await
            }
        }
    }

    /// Delete the record permanently.
    ///
    /// Only the creator may delete, compared under the most specific identity scheme the record
    /// carries: by account id when the record has one, by display name only for records created
    /// before the account scheme existed. A doubled submission, or a delete that a concurrent
    /// delete beat to the store, observes the record as gone and reports
    /// [`RoomError::RecordNotFound`].
    pub async fn delete(
        &mut self,
        record: &PromiseRecord,
        identity: &Identity,
        gate: &AccessGate,
    ) -> Result<(), RoomError> {
        if !gate.is_unlocked() {
            return Err(RoomError::GateLocked);
        }
        if !record.is_owner(identity) {
            return Err(RoomError::NotOwner);
        }

        let occurred = self
            .store
            .delete_promise(&record.id)
            .await
            .map_err(store_unavailable)?;
        if !occurred {
            return Err(RoomError::RecordNotFound);
        }
        debug!(id = %record.id, owner = %identity, "deleted promise");

        Ok(())
    }
}

/// The references a joining identity is recorded under, matching the record's own scheme.
fn join_references(record: &PromiseRecord, identity: &Identity) -> Vec<IdentityRef> {
    if record.uses_account_scheme() {
        identity.references()
    } else {
        vec![IdentityRef::Name(identity.display_name().to_string())]
    }
}

fn store_unavailable(err: impl Display) -> RoomError {
    RoomError::StoreUnavailable(err.to_string())
}
