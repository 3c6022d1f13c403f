// SPDX-License-Identifier: MIT OR Apache-2.0

//! Promise Room: schedule shared appointments ("promises") among friends.
//!
//! A promise has a title, date, time, meeting place and a penalty for showing up late. Its
//! creator shares it as a password-protected link; friends open the link, unlock it (creators and
//! existing participants skip the password) and join. Only the creator may delete it.
//!
//! The [`PromiseRoom`] handle wires three seams together: a [`PromiseStore`] for persistence and
//! live queries, a [`SessionProvider`] for sign-in, and a [`PlaceLookup`] for geocoding meeting
//! places. In-memory realisations of all three are provided, so the whole flow runs without any
//! hosted service:
//!
//! ```rust
//! use promise_room::{MemorySessions, PromiseDraft, PromiseRoom};
//!
//! # async fn run() -> Result<(), promise_room::RoomError> {
//! let mut room = PromiseRoom::builder()
//!     .sessions(MemorySessions::signed_in("kakao:123", "Alice"))
//!     .build();
//!
//! let id = room
//!     .create_promise(&PromiseDraft {
//!         title: "Amusement park".to_string(),
//!         date: "2026-03-01".to_string(),
//!         time: "13:00".to_string(),
//!         location: "Lotte World".to_string(),
//!         penalty: "Latecomer buys coffee".to_string(),
//!         password: "swordfish".to_string(),
//!     })
//!     .await?;
//!
//! let view = room.open_promise(&id).await?;
//! assert!(view.detail().is_some());
//! # Ok(())
//! # }
//! ```
//!
//! The promise password is stored and compared as plaintext. It is a convenience for sharing a
//! link among friends, deliberately not a security boundary; operators should treat it
//! accordingly.

pub mod builder;
pub mod feed;
pub mod places;
pub mod room;
pub mod view;

pub use builder::PromiseRoomBuilder;
pub use feed::Dashboard;
pub use places::{LocalPlaceLookup, NoPlaceLookup, Place, PlaceLookup, StaticPlaces};
pub use room::PromiseRoom;
pub use view::PromiseView;

pub use promise_room_auth::sessions::MemorySessions;
pub use promise_room_auth::{AccessDecision, RoomError, Session, SessionProvider};
pub use promise_room_core::{
    Identity, IdentityRef, Location, NewPromise, PromiseDraft, PromiseId, PromiseRecord,
};
pub use promise_room_store::{
    MemoryStore, PromiseStore, StoreEvent, SubscribableStore, Subscription,
};
