// SPDX-License-Identifier: MIT OR Apache-2.0

use std::convert::Infallible;

use promise_room::{
    AccessDecision, IdentityRef, MemorySessions, MemoryStore, NewPromise, Place, PromiseDraft,
    PromiseId, PromiseRecord, PromiseRoom, PromiseStore, RoomError, StaticPlaces, StoreEvent,
    SubscribableStore, Subscription,
};
use thiserror::Error;

fn draft() -> PromiseDraft {
    PromiseDraft {
        title: "Amusement park".to_string(),
        date: "2026-03-01".to_string(),
        time: "13:00".to_string(),
        location: "Lotte World".to_string(),
        penalty: "Latecomer buys coffee".to_string(),
        password: "swordfish".to_string(),
    }
}

#[tokio::test]
async fn two_callers_share_a_promise_end_to_end() {
    let store = MemoryStore::new();
    let mut alice = PromiseRoom::builder()
        .store(store.clone())
        .sessions(MemorySessions::signed_in("kakao:123", "Alice"))
        .build();
    let mut bob = PromiseRoom::builder()
        .store(store.clone())
        .sessions(MemorySessions::signed_in("kakao:456", "Bob"))
        .build();

    let id = alice.create_promise(&draft()).await.unwrap();

    // The creator's view is unlocked from the start.
    let alice_view = alice.open_promise(&id).await.unwrap();
    assert_eq!(alice_view.decision(), AccessDecision::Granted);
    assert!(alice_view.is_owner());

    // Bob sees the title but nothing else until he supplies the password.
    let mut bob_view = bob.open_promise(&id).await.unwrap();
    assert_eq!(bob_view.decision(), AccessDecision::PasswordRequired);
    assert_eq!(bob_view.title(), "Amusement park");
    assert!(bob_view.detail().is_none());
    assert_eq!(
        bob.join(&mut bob_view).await,
        Err(RoomError::GateLocked)
    );

    assert_eq!(
        bob_view.submit_password("Swordfish"),
        Err(RoomError::WrongPassword)
    );
    bob_view.submit_password("swordfish").unwrap();
    assert!(bob_view.detail().is_some());

    bob.join(&mut bob_view).await.unwrap();
    assert!(bob_view.is_participant());

    // Reopening skips the password now that Bob is a participant.
    let reopened = bob.open_promise(&id).await.unwrap();
    assert_eq!(reopened.decision(), AccessDecision::Granted);

    bob.leave(&mut bob_view).await.unwrap();
    assert!(!bob_view.is_participant());

    // Access is not ownership: Bob unlocked the promise but cannot delete it.
    let mut intruding = bob.open_promise(&id).await.unwrap();
    intruding.submit_password("swordfish").unwrap();
    assert_eq!(
        bob.delete_promise(intruding).await,
        Err(RoomError::NotOwner)
    );

    let owner_view = alice.open_promise(&id).await.unwrap();
    alice.delete_promise(owner_view).await.unwrap();
    assert_eq!(
        bob.open_promise(&id).await.map(|_| ()),
        Err(RoomError::RecordNotFound)
    );
}

#[tokio::test]
async fn callers_without_any_identity_are_turned_away() {
    let mut room = PromiseRoom::builder()
        .sessions(MemorySessions::signed_out())
        .build();

    assert_eq!(room.current_identity().await, Ok(None));
    assert_eq!(
        room.create_promise(&draft()).await,
        Err(RoomError::Unauthenticated)
    );
    assert_eq!(
        room.open_promise(&PromiseId::from("00000001"))
            .await
            .map(|_| ()),
        Err(RoomError::Unauthenticated)
    );
}

#[tokio::test]
async fn legacy_anonymous_names_still_create_promises() {
    let mut room = PromiseRoom::builder()
        .sessions(MemorySessions::signed_out())
        .anonymous_name("Carol")
        .build();

    let id = room.create_promise(&draft()).await.unwrap();
    let view = room.open_promise(&id).await.unwrap();
    let record = view.detail().unwrap();

    assert_eq!(record.creator_label(), Some("Carol"));
    assert_eq!(
        record.participants,
        vec![IdentityRef::Name("Carol".to_string())]
    );
}

#[tokio::test]
async fn signing_out_takes_effect_on_the_next_operation() {
    let mut room = PromiseRoom::builder()
        .sessions(MemorySessions::signed_in("kakao:123", "Alice"))
        .build();
    let id = room.create_promise(&draft()).await.unwrap();

    room.sign_out().await.unwrap();
    assert_eq!(
        room.open_promise(&id).await.map(|_| ()),
        Err(RoomError::Unauthenticated)
    );

    room.sign_in().await.unwrap();
    assert!(room.open_promise(&id).await.is_ok());
}

#[tokio::test]
async fn known_meeting_places_are_geocoded_at_creation() {
    let places = StaticPlaces::new().with_place(
        "Lotte World",
        Place {
            label: "Lotte World Adventure".to_string(),
            lat: 37.5111,
            lng: 127.098,
            place_id: Some("8202".to_string()),
        },
    );
    let mut room = PromiseRoom::builder()
        .sessions(MemorySessions::signed_in("kakao:123", "Alice"))
        .places(places)
        .build();

    let id = room.create_promise(&draft()).await.unwrap();
    let view = room.open_promise(&id).await.unwrap();
    let location = view.detail().unwrap().location.clone().unwrap();
    assert_eq!(location.label, "Lotte World Adventure");
    assert_eq!(location.lat, Some(37.5111));

    // Unknown labels pass through as plain text.
    let mut unknown = draft();
    unknown.location = "Somewhere new".to_string();
    let id = room.create_promise(&unknown).await.unwrap();
    let view = room.open_promise(&id).await.unwrap();
    let location = view.detail().unwrap().location.clone().unwrap();
    assert_eq!(location.label, "Somewhere new");
    assert_eq!(location.lat, None);
}

#[tokio::test]
async fn the_dashboard_follows_changes_from_other_callers() {
    let store = MemoryStore::new();
    let mut alice = PromiseRoom::builder()
        .store(store.clone())
        .sessions(MemorySessions::signed_in("kakao:123", "Alice"))
        .build();
    let mut bob = PromiseRoom::builder()
        .store(store.clone())
        .sessions(MemorySessions::signed_in("kakao:456", "Bob"))
        .build();

    alice.create_promise(&draft()).await.unwrap();

    let mut feed = alice.dashboard().await.unwrap();
    assert!(feed.is_live());
    assert_eq!(feed.promises().len(), 1);

    let mut second = draft();
    second.title = "Movie night".to_string();
    bob.create_promise(&second).await.unwrap();

    let event = feed.changed().await.unwrap();
    assert!(matches!(event, StoreEvent::Created(_)));
    assert_eq!(feed.promises().len(), 2);
    assert_eq!(feed.promises()[0].title, "Movie night");
}

/// Delegates every read and mutation but never manages to establish a live query, like a backend
/// whose streaming endpoint is down while its request endpoint still answers.
#[derive(Clone, Debug)]
struct FlakyStore {
    inner: MemoryStore,
}

#[derive(Debug, Error)]
#[error("streaming endpoint is down")]
struct StreamingDown;

impl PromiseStore for FlakyStore {
    type Error = Infallible;

    async fn insert_promise(&mut self, fields: NewPromise) -> Result<PromiseId, Self::Error> {
        self.inner.insert_promise(fields).await
    }

    async fn get_promise(&self, id: &PromiseId) -> Result<Option<PromiseRecord>, Self::Error> {
        self.inner.get_promise(id).await
    }

    async fn add_participant(
        &mut self,
        id: &PromiseId,
        references: &[IdentityRef],
    ) -> Result<Option<bool>, Self::Error> {
        self.inner.add_participant(id, references).await
    }

    async fn remove_participant(
        &mut self,
        id: &PromiseId,
        references: &[IdentityRef],
    ) -> Result<Option<bool>, Self::Error> {
        self.inner.remove_participant(id, references).await
    }

    async fn delete_promise(&mut self, id: &PromiseId) -> Result<bool, Self::Error> {
        self.inner.delete_promise(id).await
    }

    async fn all_promises(&self) -> Result<Vec<PromiseRecord>, Self::Error> {
        self.inner.all_promises().await
    }
}

impl SubscribableStore for FlakyStore {
    type Error = StreamingDown;

    async fn subscribe(&self) -> Result<Subscription, Self::Error> {
        Err(StreamingDown)
    }
}

#[tokio::test]
async fn the_dashboard_degrades_to_a_one_shot_read() {
    let mut room = PromiseRoom::builder()
        .store(FlakyStore {
            inner: MemoryStore::new(),
        })
        .sessions(MemorySessions::signed_in("kakao:123", "Alice"))
        .build();

    room.create_promise(&draft()).await.unwrap();

    let mut feed = room.dashboard().await.unwrap();
    assert!(!feed.is_live());
    assert_eq!(feed.promises().len(), 1);

    // A fallback feed stays at its snapshot.
    room.create_promise(&draft()).await.unwrap();
    assert!(feed.changed().await.is_none());
    assert_eq!(feed.promises().len(), 1);
}
