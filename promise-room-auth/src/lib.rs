// SPDX-License-Identifier: MIT OR Apache-2.0

//! Access control and membership management for shared promise records.
//!
//! Three cooperating responsibilities, evaluated strictly in order:
//!
//! 1. The [resolver](crate::resolver) turns whichever identity subsystem is active (a provider
//!    session or a legacy anonymous display name) into one [`Identity`](promise_room_core::Identity)
//!    value, or none.
//! 2. The [`AccessGate`] decides whether that identity may see a record's full detail, must first
//!    supply the record's password, or is turned away.
//! 3. The [`RoomManager`] executes join, leave and delete against the store for callers whose
//!    gate is unlocked, enforcing ownership and duplicate-membership invariants.
//!
//! Failures never crash a session: every precondition violation is reported as a discrete
//! [`RoomError`] and leaves the record unchanged from the caller's point of view.

pub mod access;
mod error;
pub mod resolver;
pub mod room;
pub mod sessions;
pub mod traits;

pub use access::{AccessDecision, AccessGate, GateState};
pub use error::RoomError;
pub use room::RoomManager;
pub use traits::{LocalSessionProvider, Session, SessionProvider};
