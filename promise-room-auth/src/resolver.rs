// SPDX-License-Identifier: MIT OR Apache-2.0

//! The single resolution point for the caller's current identity.
//!
//! Identity is resolved once per request and threaded through the access gate and membership
//! manager as an explicit value; nothing else in the stack reads ambient session state.
use promise_room_core::Identity;

use crate::error::RoomError;
use crate::traits::{Session, SessionProvider};

/// Resolve the caller's identity from whichever identity subsystem is active.
///
/// An active provider session takes precedence: its subject id becomes the authoritative key and
/// its display name the label (the name is still used to match legacy records which only recorded
/// names). The anonymous display name is consulted only when no usable session exists, which
/// covers deployments still on the pre-provider identity scheme.
///
/// Empty or whitespace-only names are never valid identities; they resolve to `None` just like a
/// missing session. Read-only: resolving has no side effects.
pub fn resolve(session: Option<&Session>, anonymous_name: Option<&str>) -> Option<Identity> {
    if let Some(session) = session
        && let Some(identity) = Identity::account(&session.subject_id, &session.display_name)
    {
        return Some(identity);
    }

    anonymous_name.and_then(Identity::anonymous)
}

/// Resolve the caller's identity by asking the session provider.
///
/// Provider failures surface as [`RoomError::StoreUnavailable`]; a signed-out caller resolves to
/// `Ok(None)`.
pub async fn resolve_current<P>(
    provider: &P,
    anonymous_name: Option<&str>,
) -> Result<Option<Identity>, RoomError>
where
    P: SessionProvider,
{
    let session = provider
        .current_session()
        .await
        .map_err(|err| RoomError::StoreUnavailable(err.to_string()))?;

    Ok(resolve(session.as_ref(), anonymous_name))
}
