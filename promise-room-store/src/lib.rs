// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interfaces and implementations of persistence layers for promise records.
//!
//! The hosted document store behind a deployment is reached exclusively through the narrow
//! [`PromiseStore`] interface. Its participant mutations are atomic, duplicate-suppressing
//! union-append and set-difference-remove primitives: callers never read, locally modify and
//! write back the participant collection, because that pattern is unsafe under concurrent
//! callers. The store serialises individual mutations; no further cross-operation ordering is
//! guaranteed.
//!
//! Live dashboards consume the [`SubscribableStore`] interface, which hands out a snapshot of all
//! records (newest first) together with a receiver pushing every subsequent change.
//!
//! An in-memory realisation of both interfaces is provided in the form of a [`MemoryStore`],
//! gated by the `memory` feature flag and enabled by default.
pub mod event;
#[cfg(feature = "memory")]
pub mod memory;
pub mod traits;

pub use event::StoreEvent;
#[cfg(feature = "memory")]
pub use memory::MemoryStore;
pub use traits::{
    LocalPromiseStore, LocalSubscribableStore, PromiseStore, Subscription, SubscribableStore,
};
