// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use serde::{Deserialize, Serialize};

/// A stored reference to an identity, under one of the two schemes found in persisted records.
///
/// `Name` references are legacy: a free-text display name with no uniqueness guarantee, chosen by
/// the user for a single client session. `Account` references are current: a stable identifier
/// issued by the sign-in provider. Both kinds appear in historical data and every comparison
/// against a record must check whichever kinds the record carries.
#[derive(Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IdentityRef {
    /// Legacy free-text display name reference.
    Name(String),

    /// Stable provider-issued account identifier reference.
    Account(String),
}

impl IdentityRef {
    /// The raw reference value.
    pub fn value(&self) -> &str {
        match self {
            IdentityRef::Name(value) => value,
            IdentityRef::Account(value) => value,
        }
    }

    /// Return true if this reference uses the stable account scheme.
    pub fn is_account(&self) -> bool {
        matches!(self, IdentityRef::Account(_))
    }

    /// Return true if this reference uses the legacy name scheme.
    pub fn is_name(&self) -> bool {
        !self.is_account()
    }
}

impl fmt::Display for IdentityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityRef::Name(value) => write!(f, "name:{}", value),
            IdentityRef::Account(value) => write!(f, "account:{}", value),
        }
    }
}

/// A resolved caller identity.
///
/// Exactly one identity is authoritative per caller at any time. When a provider-issued account
/// id is present it is the canonical key for equality comparisons; the display name is still kept
/// around because legacy records only recorded names and must remain resolvable.
///
/// Construction rejects empty or whitespace-only display names, so a held `Identity` always has a
/// usable label and key.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    account_id: Option<String>,
    display_name: String,
}

impl Identity {
    /// An anonymous identity from a free-text display name.
    ///
    /// Returns `None` when the name is empty or whitespace-only; empty identities are never valid
    /// keys.
    pub fn anonymous(display_name: &str) -> Option<Self> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return None;
        }

        Some(Self {
            account_id: None,
            display_name: display_name.to_string(),
        })
    }

    /// An account identity from a provider-issued subject id and the display name the provider
    /// reported at sign-in time.
    ///
    /// Returns `None` when either value is empty or whitespace-only.
    pub fn account(subject_id: &str, display_name: &str) -> Option<Self> {
        let subject_id = subject_id.trim();
        let display_name = display_name.trim();
        if subject_id.is_empty() || display_name.is_empty() {
            return None;
        }

        Some(Self {
            account_id: Some(subject_id.to_string()),
            display_name: display_name.to_string(),
        })
    }

    /// The canonical key of this identity: the account reference when one exists, the name
    /// reference otherwise.
    pub fn key(&self) -> IdentityRef {
        match &self.account_id {
            Some(id) => IdentityRef::Account(id.clone()),
            None => IdentityRef::Name(self.display_name.clone()),
        }
    }

    /// The provider-issued account id, when this is an account identity.
    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    /// The label shown to the user.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// All references under which this identity may appear in stored records.
    ///
    /// Account identities may appear under both schemes, since records written during the
    /// migration period mirror each participant as an account id and a display name.
    pub fn references(&self) -> Vec<IdentityRef> {
        let mut refs = Vec::with_capacity(2);
        if let Some(id) = &self.account_id {
            refs.push(IdentityRef::Account(id.clone()));
        }
        refs.push(IdentityRef::Name(self.display_name.clone()));
        refs
    }

    /// Return true when a stored reference points at this identity.
    ///
    /// Account references match by account id, name references by display name. Display names are
    /// neither unique nor stable, so name matches are only as trustworthy as the legacy scheme
    /// itself; callers which need the strictest available comparison should use
    /// [`CreatorRef::matches_owner`](crate::promise::CreatorRef::matches_owner).
    pub fn matches(&self, reference: &IdentityRef) -> bool {
        match reference {
            IdentityRef::Account(id) => self.account_id.as_deref() == Some(id.as_str()),
            IdentityRef::Name(name) => self.display_name == *name,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}
