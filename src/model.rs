//! Domain entities
//!
//! `Sample`, `Stop`, `Place`, `Move`, `HourMatrix`, and `Features`. All are
//! value types: once constructed they are not mutated, except for the
//! single `place_id` assignment the clusterer performs on each `Stop`.
//!
//! Timestamps are `chrono::DateTime<Utc>` carrying millisecond precision.
//! The crate itself never interprets a timestamp's calendar day in any
//! particular time zone — a host that wants local-day boundaries is
//! expected to have already shifted its instants before calling into this
//! crate, the same way an ontology layer keeps all `DateTime<Utc>` fields
//! zone-agnostic and leaves zone display to its API layer.

use crate::geometry::Location;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single geolocation observation.
///
/// Serializes flat — `{latitude, longitude, datetime}` — rather than
/// nesting `location`, matching the wire record a host feeds this crate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(flatten)]
    pub location: Location,
    #[serde(rename = "datetime", with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl Sample {
    pub fn new(location: Location, timestamp: DateTime<Utc>) -> Self {
        Self {
            location,
            timestamp,
        }
    }
}

/// Sentinel `place_id` for a stop that has not been assigned to any place
/// (noise, or simply not yet clustered).
pub const UNASSIGNED_PLACE: i32 = -1;

/// A maximal contiguous run of samples whose centroid stayed within a
/// spatial radius for at least a minimum duration.
///
/// Serializes with `location` under the wire key `centroid`, matching the
/// `{centroid: {latitude, longitude}, place_id, arrival, departure}` record
/// a host persists or transmits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    #[serde(rename = "centroid")]
    pub location: Location,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub arrival: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub departure: DateTime<Utc>,
    pub place_id: i32,
}

impl Stop {
    pub fn duration(&self) -> chrono::Duration {
        self.departure - self.arrival
    }

    pub fn is_noise(&self) -> bool {
        self.place_id == UNASSIGNED_PLACE
    }
}

/// A spatial cluster of stops, produced by density-based clustering over
/// stop centroids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: i32,
    pub location: Location,
    /// Sum of `duration()` across every member stop, in seconds.
    pub total_duration_seconds: f64,
}

/// An ordered pair of stops plus the path distance of the samples threaded
/// between them.
///
/// `stop_from`/`stop_to` are modeled here as `(place_id, location, time)`
/// projections rather than embedded `Stop` values: the reconstruction walk
/// naturally produces place ids and raw timestamps for its endpoints, not
/// full `Stop` records — and the leading "dead end" move before the first
/// real stop, or the trailing one after the last, has no real stop on one
/// side to embed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub location_from: Location,
    pub location_to: Location,
    pub place_from: i32,
    pub place_to: i32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub departure: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub arrival: DateTime<Utc>,
    pub distance: f64,
}

impl Move {
    pub fn duration(&self) -> chrono::Duration {
        self.arrival - self.departure
    }
}

/// A 24 × P matrix of hours-occupied per (hour-of-day, place) for one
/// calendar day. Place ids are the dense `0..num_places` labels the place
/// clusterer assigns, so `cells[hour][place_id as usize]` addresses a cell
/// directly — consistent column indexing is what lets `overlap()` compare
/// two different days' matrices place-for-place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourMatrix {
    pub num_places: usize,
    /// `cells[hour][place_id]`, 24 rows.
    pub cells: Vec<Vec<f64>>,
}

impl HourMatrix {
    /// A 24 × `num_places` matrix of zeros.
    pub fn new(num_places: usize) -> Self {
        Self {
            num_places,
            cells: vec![vec![0.0; num_places]; 24],
        }
    }

    /// Add `amount` to the `(hour, place_id)` cell. Silently ignored for
    /// noise (`place_id < 0`) or an out-of-range place id, since neither
    /// should occur once stops have been through the clusterer.
    pub fn add(&mut self, hour: usize, place_id: i32, amount: f64) {
        if place_id >= 0 && (place_id as usize) < self.num_places {
            self.cells[hour][place_id as usize] += amount;
        }
    }
}

/// The derived feature record for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Features {
    pub day: chrono::NaiveDate,
    pub number_of_places_daily: usize,
    pub home_stay_daily: f64,
    pub total_distance_daily: f64,
    pub location_variance_daily: f64,
    pub entropy_daily: f64,
    pub normalized_entropy_daily: f64,
    pub routine_index_daily: f64,
    pub hour_matrix_daily: HourMatrix,
}
