// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data types for "promises", shared appointments between friends, and the identity references
//! used to decide who may see and change them.
//!
//! Two identity schemes coexist in stored records: an older one keyed by free-text display names
//! and a newer one keyed by stable, provider-issued account identifiers. Records created during
//! the migration period can carry references under both schemes at once. All matching logic in
//! this crate is scheme-aware so that legacy and current records remain readable side by side.

pub mod identity;
pub mod promise;

pub use identity::{Identity, IdentityRef};
pub use promise::{
    CreatorRef, DraftError, Location, NewPromise, PromiseDraft, PromiseId, PromiseRecord,
};
