// SPDX-License-Identifier: MIT OR Apache-2.0

use promise_room_auth::{AccessDecision, AccessGate, RoomError};
use promise_room_core::{Identity, PromiseRecord};

/// One caller's view of one promise: the record, the caller's resolved identity and the access
/// gate between them.
///
/// A view starts unlocked when the caller is the record's creator or already a participant;
/// everyone else sees only the title until they submit the record's password. Unlocking is
/// one-way and lasts for the lifetime of the view. Membership and lifecycle operations go through
/// [`PromiseRoom`](crate::PromiseRoom), which refreshes the view from the store's confirmed
/// result after each mutation.
#[derive(Debug)]
pub struct PromiseView {
    record: PromiseRecord,
    identity: Identity,
    gate: AccessGate,
}

impl PromiseView {
    pub(crate) fn new(record: PromiseRecord, identity: Identity) -> Self {
        let gate = AccessGate::open(&record, &identity);

        Self {
            record,
            identity,
            gate,
        }
    }

    /// The caller's current access decision for this promise.
    pub fn decision(&self) -> AccessDecision {
        self.gate.decision()
    }

    /// The promise title; visible even behind the password prompt, so the caller knows what they
    /// are unlocking.
    pub fn title(&self) -> &str {
        &self.record.title
    }

    /// The full record, once the gate is unlocked.
    pub fn detail(&self) -> Option<&PromiseRecord> {
        if self.gate.is_unlocked() {
            Some(&self.record)
        } else {
            None
        }
    }

    /// Attempt to unlock the view with a password candidate.
    pub fn submit_password(&mut self, candidate: &str) -> Result<(), RoomError> {
        self.gate.submit_password(&self.record, candidate)
    }

    /// Return true when the caller owns this promise and may delete it.
    pub fn is_owner(&self) -> bool {
        self.record.is_owner(&self.identity)
    }

    /// Return true when the caller appears in the participant set.
    pub fn is_participant(&self) -> bool {
        self.record.is_participant(&self.identity)
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub(crate) fn record(&self) -> &PromiseRecord {
        &self.record
    }

    pub(crate) fn gate(&self) -> &AccessGate {
        &self.gate
    }

    pub(crate) fn refresh(&mut self, record: PromiseRecord) {
        self.record = record;
    }
}
