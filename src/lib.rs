//! Mobility feature extraction core
//!
//! A pure, synchronous stream-processing and clustering engine that turns
//! a temporally ordered batch of geolocation samples into a canonical set
//! of per-day mobility features: home-stay ratio, routine index, place
//! count, time-place entropy, distance traveled, and location variance.
//!
//! The core performs no I/O, no persistence, and makes no network calls —
//! acquisition, storage, and presentation are all host responsibilities.
//! A processing run is a pure function `(samples, parameters,
//! history_matrices) -> Features`.
//!
//! Pipeline, leaves first:
//!
//! ```text
//! samples --[stops::detect_stops]--> stops
//! stops --[places::cluster_places]--> places (mutates stop.place_id)
//! (samples, stops) --[moves::reconstruct_moves]--> moves
//! (stops, day) --[day::build_hour_matrix]--> HourMatrix
//! (day, stops, places, moves, samples, history) --[features::extract_features]--> Features
//! ```

pub mod config;
pub mod day;
pub mod error;
pub mod features;
pub mod geometry;
pub mod model;
pub mod moves;
pub mod places;
pub mod stops;

pub use config::Parameters;
pub use day::{build_hour_matrix, error as matrix_error, home_place_id, overlap, sum as matrix_sum};
pub use error::{Error, Result};
pub use features::extract_features;
pub use geometry::{centroid, haversine, haversine_with_radius, Location, EARTH_RADIUS_METERS};
pub use model::{Features, HourMatrix, Move, Place, Sample, Stop, UNASSIGNED_PLACE};
pub use moves::reconstruct_moves;
pub use places::cluster_places;
pub use stops::detect_stops;
