// SPDX-License-Identifier: MIT OR Apache-2.0

use promise_room_core::DraftError;
use thiserror::Error;

/// Everything that can go wrong when gating access to a promise or changing its membership.
///
/// All variants are recovered at this boundary and surfaced to the caller as a discrete signal;
/// the record is left unchanged from the caller's point of view. Store-level failures are not
/// retried here; retrying is a caller decision.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoomError {
    /// No identity could be resolved; the caller must authenticate first.
    #[error("caller is not authenticated")]
    Unauthenticated,

    /// The submitted password did not match the record's password exactly.
    #[error("wrong password")]
    WrongPassword,

    /// A membership or lifecycle operation was attempted before the access gate reached
    /// `Unlocked`.
    #[error("access gate has not been unlocked")]
    GateLocked,

    /// The caller already appears in the record's participant set.
    #[error("already a participant of this promise")]
    AlreadyParticipant,

    /// The caller does not appear in the record's participant set.
    #[error("not a participant of this promise")]
    NotParticipant,

    /// The caller is not the record's creator under the record's most specific identity scheme.
    #[error("only the creator may delete this promise")]
    NotOwner,

    /// No record with the requested id exists (or it was deleted while the caller looked at it).
    #[error("promise record not found")]
    RecordNotFound,

    /// The draft for a new promise is missing required fields.
    #[error("invalid promise draft: {0}")]
    InvalidDraft(#[from] DraftError),

    /// Generic connectivity or I/O failure from the store or the identity provider.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}
