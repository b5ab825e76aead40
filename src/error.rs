//! Error types for the mobility core

use thiserror::Error;

/// Structural and programmer-error conditions the core can surface.
///
/// Data-driven edge cases (no stops, a zero-sum matrix, an unset home
/// place) are never represented here — they are documented sentinel
/// return values on the affected feature, per the extractor's contract.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A sample batch was not ordered non-decreasingly by timestamp.
    #[error("samples are not ordered non-decreasingly by timestamp at index {index}")]
    UnorderedSamples { index: usize },

    /// `build_hour_matrix` was asked to fold in a stop whose arrival and
    /// departure fall on different calendar days.
    #[error("stop {stop_index} straddles midnight: arrival and departure are on different days")]
    StraddlesMidnight { stop_index: usize },

    /// A coordinate was non-finite or outside the valid lat/lon range.
    #[error("invalid coordinate: latitude={lat}, longitude={lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// `centroid()` was called on an empty point set. Callers must never
    /// do this; it is a programmer error, not a data-driven sentinel.
    #[error("centroid() requires at least one point")]
    EmptyCentroidInput,
}

/// Result type alias for the mobility core.
pub type Result<T> = std::result::Result<T, Error>;
