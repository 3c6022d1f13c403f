// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use promise_room_core::{Identity, PromiseRecord};
use tracing::debug;

use crate::error::RoomError;

/// What a caller may do with a promise record right now. Computed per view per caller, never
/// persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessDecision {
    /// Full detail is visible; membership and lifecycle operations may be attempted.
    Granted,

    /// The caller must supply the record's password before seeing full detail.
    PasswordRequired,

    /// The caller is unauthenticated and must be routed to sign-in first.
    Denied,
}

impl fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AccessDecision::Granted => "granted",
            AccessDecision::PasswordRequired => "password required",
            AccessDecision::Denied => "denied",
        };

        write!(f, "{}", s)
    }
}

/// Gate state for one caller viewing one record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
    Locked,
    Unlocked,
}

/// The per-view access gate over a promise record.
///
/// A caller who is the record's creator or appears in its participant set, under whichever
/// identity scheme(s) the record carries, starts out `Unlocked` and never sees the password
/// prompt. Everyone else starts `Locked` and may unlock by submitting the record's password. The
/// `Locked` to `Unlocked` transition is one-way; there is no re-lock.
///
/// The password is stored and compared as plaintext, deliberately: the gate is a convenience for
/// sharing a promise link among friends, not a security boundary. Do not "fix" this into a hashed
/// scheme without a data migration, it would break every existing record.
#[derive(Debug)]
pub struct AccessGate {
    state: GateState,
}

impl AccessGate {
    /// Evaluate the initial gate state for a record and a resolved identity.
    pub fn open(record: &PromiseRecord, identity: &Identity) -> Self {
        let state = if record.is_creator(identity) || record.is_participant(identity) {
            GateState::Unlocked
        } else {
            GateState::Locked
        };
        debug!(id = %record.id, %identity, ?state, "opened access gate");

        Self { state }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self.state, GateState::Unlocked)
    }

    /// The access decision this gate currently maps to. Unauthenticated callers never reach a
    /// gate; they are [`AccessDecision::Denied`] before one is opened.
    pub fn decision(&self) -> AccessDecision {
        match self.state {
            GateState::Locked => AccessDecision::PasswordRequired,
            GateState::Unlocked => AccessDecision::Granted,
        }
    }

    /// Attempt to unlock the gate with a password candidate.
    ///
    /// Comparison is exact string equality: case-sensitive, no normalisation. A wrong candidate
    /// surfaces [`RoomError::WrongPassword`] and leaves the gate locked. Submitting to an already
    /// unlocked gate is a no-op.
    pub fn submit_password(
        &mut self,
        record: &PromiseRecord,
        candidate: &str,
    ) -> Result<(), RoomError> {
        if self.is_unlocked() {
            return Ok(());
        }

        if candidate == record.password {
            self.state = GateState::Unlocked;
            debug!(id = %record.id, "unlocked access gate by password");
            Ok(())
        } else {
            Err(RoomError::WrongPassword)
        }
    }
}

#[cfg(test)]
mod tests {
    use promise_room_core::{
        CreatorRef, Identity, IdentityRef, Location, PromiseId, PromiseRecord,
    };

    use crate::error::RoomError;

    use super::{AccessDecision, AccessGate, GateState};

    fn record() -> PromiseRecord {
        PromiseRecord {
            id: PromiseId::from("p1"),
            title: "Amusement park".to_string(),
            date: "2026-03-01".to_string(),
            time: "13:00".to_string(),
            location: Some(Location::label_only("Lotte World")),
            penalty: "Latecomer buys coffee".to_string(),
            password: "Secret".to_string(),
            creator: CreatorRef::legacy_name("Alice"),
            participants: vec![IdentityRef::Name("Alice".to_string())],
            created_at: 1,
        }
    }

    #[test]
    fn strangers_start_locked_and_unlock_by_password_once() {
        let bob = Identity::account("kakao:456", "Bob").unwrap();
        let record = record();

        let mut gate = AccessGate::open(&record, &bob);
        assert_eq!(gate.state(), GateState::Locked);
        assert_eq!(gate.decision(), AccessDecision::PasswordRequired);

        assert_eq!(
            gate.submit_password(&record, "wrong"),
            Err(RoomError::WrongPassword)
        );
        assert_eq!(gate.state(), GateState::Locked);

        // Case-sensitive, no normalisation.
        assert_eq!(
            gate.submit_password(&record, "secret"),
            Err(RoomError::WrongPassword)
        );

        assert_eq!(gate.submit_password(&record, "Secret"), Ok(()));
        assert_eq!(gate.decision(), AccessDecision::Granted);

        // The transition is one-way; another wrong submission cannot re-lock.
        assert_eq!(gate.submit_password(&record, "wrong"), Ok(()));
        assert!(gate.is_unlocked());
    }

    #[test]
    fn creators_and_participants_skip_the_password() {
        let record = record();

        let creator = Identity::anonymous("Alice").unwrap();
        assert!(AccessGate::open(&record, &creator).is_unlocked());

        let mut with_bob = record.clone();
        with_bob
            .participants
            .push(IdentityRef::Account("kakao:456".to_string()));
        let bob = Identity::account("kakao:456", "Bob").unwrap();
        assert!(AccessGate::open(&with_bob, &bob).is_unlocked());
    }

    #[test]
    fn legacy_creator_names_still_unlock_account_identities() {
        // The record predates the account scheme and only recorded a name; the caller since
        // migrated to an account identity but keeps the same display name.
        let record = record();
        let alice = Identity::account("kakao:999", "Alice").unwrap();

        let gate = AccessGate::open(&record, &alice);
        assert!(gate.is_unlocked());
    }
}
