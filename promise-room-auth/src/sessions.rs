// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory session state, the reference realisation of the [`SessionProvider`] seam.
use thiserror::Error;

use crate::traits::{Session, SessionProvider};

/// Holds at most one account profile and whether it is currently signed in.
///
/// Stands in for the hosted OAuth provider in tests and demos: `sign_in` activates the configured
/// profile, `sign_out` deactivates it.
#[derive(Clone, Debug, Default)]
pub struct MemorySessions {
    profile: Option<Session>,
    active: bool,
}

impl MemorySessions {
    /// A provider with no signed-in caller and no account to sign in with.
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// A provider whose caller is already signed in with the given account.
    pub fn signed_in(subject_id: &str, display_name: &str) -> Self {
        Self {
            profile: Some(Session::new(subject_id, display_name)),
            active: true,
        }
    }

    /// A provider with a known account which has not signed in yet.
    pub fn with_profile(subject_id: &str, display_name: &str) -> Self {
        Self {
            profile: Some(Session::new(subject_id, display_name)),
            active: false,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no account is available to sign in")]
pub struct NoAccount;

impl SessionProvider for MemorySessions {
    type Error = NoAccount;

    async fn current_session(&self) -> Result<Option<Session>, Self::Error> {
        if self.active {
            Ok(self.profile.clone())
        } else {
            Ok(None)
        }
    }

    async fn sign_in(&mut self) -> Result<Session, Self::Error> {
        match &self.profile {
            Some(profile) => {
                self.active = true;
                Ok(profile.clone())
            }
            None => Err(NoAccount),
        }
    }

    async fn sign_out(&mut self) -> Result<(), Self::Error> {
        self.active = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::traits::SessionProvider;

    use super::{MemorySessions, NoAccount};

    #[tokio::test]
    async fn sign_in_and_out_toggle_the_session() {
        let mut sessions = MemorySessions::with_profile("kakao:123", "Alice");
        assert_eq!(sessions.current_session().await, Ok(None));

        let session = sessions.sign_in().await.unwrap();
        assert_eq!(session.subject_id, "kakao:123");
        assert!(sessions.current_session().await.unwrap().is_some());

        sessions.sign_out().await.unwrap();
        assert_eq!(sessions.current_session().await, Ok(None));
    }

    #[tokio::test]
    async fn sign_in_without_an_account_fails() {
        let mut sessions = MemorySessions::signed_out();
        assert_eq!(sessions.sign_in().await, Err(NoAccount));
    }
}
