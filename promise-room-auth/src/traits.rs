// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seam towards the external identity provider.
use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};

/// A session issued by the identity provider after sign-in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Stable provider-issued subject identifier, e.g. `kakao:123`.
    pub subject_id: String,

    /// Display name reported by the provider at sign-in time. Mutable on the provider side, so
    /// never a key.
    pub display_name: String,
}

impl Session {
    pub fn new(subject_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Interface for the external sign-in provider and its session state.
///
/// Two variants of the trait are provided: one which is thread-safe (implementing `Send`) and one
/// which is purely intended for single-threaded execution contexts.
#[trait_variant::make(SessionProvider: Send)]
pub trait LocalSessionProvider {
    type Error: Display + Debug;

    /// The caller's current session.
    ///
    /// Returns `None` when the caller is signed out; callers without a session are routed to the
    /// sign-in entry point before any access evaluation.
    async fn current_session(&self) -> Result<Option<Session>, Self::Error>;

    /// Run the provider's sign-in flow and return the issued session.
    async fn sign_in(&mut self) -> Result<Session, Self::Error>;

    /// End the current session.
    async fn sign_out(&mut self) -> Result<(), Self::Error>;
}
