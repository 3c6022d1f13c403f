// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::{Identity, IdentityRef};

/// Store-assigned identifier of a promise record.
#[derive(Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromiseId(String);

impl PromiseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PromiseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PromiseId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A meeting place, as free text with optional geocoding.
///
/// Latitude, longitude and the place id come from the map collaborator at creation time and may
/// be absent; place lookup failures never block creating or viewing a promise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub label: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub place_id: Option<String>,
}

impl Location {
    /// A location with a text label only.
    pub fn label_only(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            lat: None,
            lng: None,
            place_id: None,
        }
    }
}

/// The creator reference carried by a promise record.
///
/// Records created under the legacy identity scheme only recorded a display name. Current records
/// record the creator's stable account id alongside the name. At least one of the two is always
/// present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorRef {
    name: Option<String>,
    account_id: Option<String>,
}

impl CreatorRef {
    /// Creator reference for a record created right now by the given identity.
    ///
    /// Account identities are recorded under both schemes so the record stays resolvable by
    /// legacy name-only readers.
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            name: Some(identity.display_name().to_string()),
            account_id: identity.account_id().map(|id| id.to_string()),
        }
    }

    /// Creator reference of a legacy record which only recorded a display name.
    pub fn legacy_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            account_id: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    /// Return true when the identity matches this creator under *any* scheme the reference
    /// carries. Used for access gating, where a match under either scheme grants entry.
    pub fn matches_any(&self, identity: &Identity) -> bool {
        if let Some(id) = &self.account_id
            && identity.account_id() == Some(id.as_str())
        {
            return true;
        }
        if let Some(name) = &self.name
            && identity.display_name() == name
        {
            return true;
        }
        false
    }

    /// Return true when the identity matches this creator under the *most specific* scheme the
    /// reference carries.
    ///
    /// When the record knows the creator's account id, only an account id match counts; display
    /// names are neither unique nor stable and must not grant ownership of such records. Name
    /// comparison remains the fallback for records created before the account scheme existed.
    pub fn matches_owner(&self, identity: &Identity) -> bool {
        match &self.account_id {
            Some(id) => identity.account_id() == Some(id.as_str()),
            None => match &self.name {
                Some(name) => identity.display_name() == name,
                None => false,
            },
        }
    }
}

/// A shared appointment between friends.
///
/// Created once by its creator, mutated only by adding or removing a single participant reference
/// per operation, deleted only by its creator. Title, date and the other detail fields are never
/// edited in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PromiseRecord {
    pub id: PromiseId,
    pub title: String,

    /// Calendar date as `YYYY-MM-DD`.
    pub date: String,

    /// Time of day as 24h `HH:MM`.
    pub time: String,

    pub location: Option<Location>,

    /// What a late participant owes the others.
    pub penalty: String,

    /// Shared-link password, stored and compared as plaintext. Advisory only, not a security
    /// boundary.
    pub password: String,

    pub creator: CreatorRef,

    /// Participant references. A set under each scheme: the same identity never appears twice.
    pub participants: Vec<IdentityRef>,

    /// Creation time assigned by the store, in milliseconds since the Unix epoch.
    pub created_at: u64,
}

impl PromiseRecord {
    /// Return true when the identity is the record's creator under any scheme the record carries.
    pub fn is_creator(&self, identity: &Identity) -> bool {
        self.creator.matches_any(identity)
    }

    /// Return true when the identity owns this record, compared under the most specific scheme
    /// the record carries. Only owners may delete.
    pub fn is_owner(&self, identity: &Identity) -> bool {
        self.creator.matches_owner(identity)
    }

    /// Return true when the identity appears in the participant set under any scheme.
    pub fn is_participant(&self, identity: &Identity) -> bool {
        self.participants
            .iter()
            .any(|reference| identity.matches(reference))
    }

    /// Return true when this record uses the stable account scheme (alone or alongside legacy
    /// name references).
    pub fn uses_account_scheme(&self) -> bool {
        self.creator.account_id().is_some()
            || self.participants.iter().any(IdentityRef::is_account)
    }

    /// Display label of the creator, when one was recorded.
    pub fn creator_label(&self) -> Option<&str> {
        self.creator.name().or(self.creator.account_id())
    }

    /// Sort key of the promise's start, comparable lexicographically thanks to the zero-padded
    /// `YYYY-MM-DD HH:MM` layout.
    pub fn starts_at(&self) -> String {
        format!("{} {}", self.date, self.time)
    }
}

/// User input for a new promise, before validation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromiseDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub penalty: String,
    pub password: String,
}

impl PromiseDraft {
    /// Check that every required field is filled in.
    pub fn validate(&self) -> Result<(), DraftError> {
        let fields = [
            ("title", &self.title),
            ("date", &self.date),
            ("time", &self.time),
            ("location", &self.location),
            ("penalty", &self.penalty),
            ("password", &self.password),
        ];

        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(DraftError::MissingField(name));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Fields of a promise record about to be inserted. The id and creation timestamp are assigned by
/// the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewPromise {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: Option<Location>,
    pub penalty: String,
    pub password: String,
    pub creator: CreatorRef,

    /// Initial participant references; the creator's references, exactly once.
    pub participants: Vec<IdentityRef>,
}

#[cfg(test)]
mod tests {
    use crate::identity::{Identity, IdentityRef};

    use super::{CreatorRef, Location, PromiseDraft, PromiseId, PromiseRecord};

    fn record(creator: CreatorRef, participants: Vec<IdentityRef>) -> PromiseRecord {
        PromiseRecord {
            id: PromiseId::from("p1"),
            title: "Amusement park".to_string(),
            date: "2026-03-01".to_string(),
            time: "13:00".to_string(),
            location: Some(Location::label_only("Lotte World")),
            penalty: "Latecomer buys coffee".to_string(),
            password: "swordfish".to_string(),
            creator,
            participants,
            created_at: 1,
        }
    }

    #[test]
    fn legacy_records_match_creator_by_name() {
        let record = record(
            CreatorRef::legacy_name("Alice"),
            vec![IdentityRef::Name("Alice".to_string())],
        );

        // A legacy record with only a name reference still recognises its creator after the
        // caller migrated to an account identity with the same display name.
        let alice = Identity::account("kakao:999", "Alice").unwrap();
        assert!(record.is_creator(&alice));
        assert!(record.is_owner(&alice));
        assert!(record.is_participant(&alice));

        let bob = Identity::account("kakao:1", "Bob").unwrap();
        assert!(!record.is_creator(&bob));
    }

    #[test]
    fn account_records_gate_ownership_by_id() {
        let alice = Identity::account("kakao:123", "Alice").unwrap();
        let record = record(CreatorRef::from_identity(&alice), alice.references());

        // Same display name, different account: enough for an access match, never for ownership.
        let impostor = Identity::account("kakao:666", "Alice").unwrap();
        assert!(record.is_creator(&impostor));
        assert!(!record.is_owner(&impostor));

        assert!(record.is_owner(&alice));
        assert!(record.uses_account_scheme());
    }

    #[test]
    fn anonymous_identity_never_owns_account_records() {
        let alice = Identity::account("kakao:123", "Alice").unwrap();
        let record = record(CreatorRef::from_identity(&alice), alice.references());

        let anon = Identity::anonymous("Alice").unwrap();
        assert!(!record.is_owner(&anon));
    }

    #[test]
    fn draft_validation_requires_all_fields() {
        let mut draft = PromiseDraft {
            title: "Dinner".to_string(),
            date: "2026-04-05".to_string(),
            time: "19:30".to_string(),
            location: "Gangnam".to_string(),
            penalty: "Dessert round".to_string(),
            password: "1234".to_string(),
        };
        assert!(draft.validate().is_ok());

        draft.penalty = "  ".to_string();
        assert_eq!(
            draft.validate(),
            Err(super::DraftError::MissingField("penalty"))
        );
    }

    #[test]
    fn start_keys_order_lexicographically() {
        let earlier = record(CreatorRef::legacy_name("Alice"), vec![]);
        let mut later = earlier.clone();
        later.date = "2026-03-01".to_string();
        later.time = "13:01".to_string();

        assert!(earlier.starts_at() < later.starts_at());
    }
}
