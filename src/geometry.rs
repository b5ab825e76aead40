//! Geometry primitives
//!
//! Great-circle distance and median-centroid, the two building blocks every
//! other module in this crate is layered on top of. Distances use a fixed
//! WGS-84 equatorial earth radius rather than `geo`'s built-in mean-earth-radius
//! haversine implementation, since downstream tolerances in this domain are
//! pinned to that specific constant.

use crate::error::{Error, Result};
use geo::Point as GeoPoint;

/// Earth radius in meters (WGS-84 semi-major / equatorial axis).
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// A point on the earth's surface, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Construct a `Location`, rejecting non-finite or out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite()
            || !longitude.is_finite()
            || !(-90.0..=90.0).contains(&latitude)
            || !(-180.0..=180.0).contains(&longitude)
        {
            return Err(Error::InvalidCoordinate {
                lat: latitude,
                lon: longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    fn as_geo_point(&self) -> GeoPoint<f64> {
        GeoPoint::new(self.longitude, self.latitude)
    }
}

/// Great-circle distance between two locations, in meters, on a sphere of
/// radius `EARTH_RADIUS_METERS`.
///
/// Symmetric, non-negative, and zero for `haversine(a, a)`.
pub fn haversine(a: &Location, b: &Location) -> f64 {
    haversine_with_radius(a, b, EARTH_RADIUS_METERS)
}

/// Great-circle distance using a caller-supplied earth radius.
pub fn haversine_with_radius(a: &Location, b: &Location, radius_meters: f64) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().asin();

    radius_meters * c
}

/// Median-centroid of a point set: latitude is the median of the input
/// latitudes, longitude is the median of the input longitudes, each taken
/// independently. Even counts resolve to the lower median (the value at
/// sorted index `n/2`) for determinism. Robust to GPS outliers in a way a
/// mean centroid is not.
///
/// Undefined — and rejected — for an empty point set; callers must never
/// pass one.
pub fn centroid(points: &[Location]) -> Result<Location> {
    if points.is_empty() {
        return Err(Error::EmptyCentroidInput);
    }

    let mut lats: Vec<f64> = points.iter().map(|p| p.latitude).collect();
    let mut lons: Vec<f64> = points.iter().map(|p| p.longitude).collect();
    lats.sort_by(|a, b| a.partial_cmp(b).unwrap());
    lons.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let mid = lats.len() / 2;
    Ok(Location {
        latitude: lats[mid],
        longitude: lons[mid],
    })
}
