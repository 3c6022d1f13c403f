// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seam towards the external map and place-search collaborator.
//!
//! Place lookup only decorates a promise: it fills in coordinates at creation time and labels map
//! positions. Its failure must never block creating or viewing a promise, so every caller treats
//! lookup errors as "no result".
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};

/// A geocoded place returned by the map collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub label: String,
    pub lat: f64,
    pub lng: f64,
    pub place_id: Option<String>,
}

/// Interface for keyword place search and reverse labelling of map positions.
///
/// Two variants of the trait are provided: one which is thread-safe (implementing `Send`) and one
/// which is purely intended for single-threaded execution contexts.
#[trait_variant::make(PlaceLookup: Send)]
pub trait LocalPlaceLookup {
    type Error: Display + Debug;

    /// Best match for a search keyword.
    ///
    /// Returns `None` when nothing matched.
    async fn search_place(&self, keyword: &str) -> Result<Option<Place>, Self::Error>;

    /// Human-readable label for a map position, e.g. after a click on the map.
    async fn reverse_label(&self, lat: f64, lng: f64) -> Result<Option<String>, Self::Error>;
}

/// A lookup that never finds anything: the default when no map collaborator is wired in.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPlaceLookup;

impl PlaceLookup for NoPlaceLookup {
    type Error = Infallible;

    async fn search_place(&self, _keyword: &str) -> Result<Option<Place>, Self::Error> {
        Ok(None)
    }

    async fn reverse_label(&self, _lat: f64, _lng: f64) -> Result<Option<String>, Self::Error> {
        Ok(None)
    }
}

/// A fixed keyword table, standing in for the map collaborator in tests and demos.
#[derive(Clone, Debug, Default)]
pub struct StaticPlaces {
    places: HashMap<String, Place>,
}

impl StaticPlaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, keyword: &str, place: Place) -> Self {
        self.places.insert(keyword.to_string(), place);
        self
    }
}

impl PlaceLookup for StaticPlaces {
    type Error = Infallible;

    async fn search_place(&self, keyword: &str) -> Result<Option<Place>, Self::Error> {
        Ok(self.places.get(keyword).cloned())
    }

    async fn reverse_label(&self, lat: f64, lng: f64) -> Result<Option<String>, Self::Error> {
        let label = self
            .places
            .values()
            .find(|place| place.lat == lat && place.lng == lng)
            .map(|place| place.label.clone());

        Ok(label)
    }
}
