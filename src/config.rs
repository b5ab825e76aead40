//! Tunable parameters
//!
//! A plain struct with documented defaults, in the same spirit as the
//! small configuration types elsewhere in this codebase (e.g.
//! `DriveTier`/`DriveConfig` in `core/src/api/drive.rs`): no file or
//! environment loading here — that is explicitly a host concern — just a
//! `Default` impl that pins the documented numbers.

use crate::geometry::EARTH_RADIUS_METERS;

/// Every tunable the core's operations accept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    /// Stop detector spatial radius, in meters.
    pub min_stop_distance: f64,
    /// Stop detector minimum duration.
    pub min_stop_duration: chrono::Duration,
    /// Place clusterer epsilon, in meters.
    pub min_place_distance: f64,
    /// Move reconstructor minimum duration.
    pub min_move_duration: chrono::Duration,
    /// Rolling history window for routine-index comparisons.
    pub history_window: chrono::Duration,
    /// Sphere radius used by `haversine`, in meters.
    pub earth_radius: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            min_stop_distance: 50.0,
            min_stop_duration: chrono::Duration::minutes(10),
            min_place_distance: 50.0,
            min_move_duration: chrono::Duration::minutes(5),
            history_window: chrono::Duration::days(28),
            earth_radius: EARTH_RADIUS_METERS,
        }
    }
}
