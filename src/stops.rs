//! Stop detector
//!
//! An online state machine over a chronologically ordered batch of
//! samples: `SEEDING` (no current stop) → `EXPANDING` (accumulating points
//! within the spatial radius, centroid recomputed after every admitted
//! point) → `EMIT` (a point fell outside the radius, or the stream ended)
//! → back to `SEEDING`. All candidates are flushed by the time a batch is
//! exhausted; a final pass drops any candidate under the minimum duration.
//!
//! Generalized from the greedy cluster-expansion walk in
//! `core/src/transforms/enrich/location/visit_clustering.rs` to a
//! single-pass centroid-recompute contract: that cluster-expansion pass
//! gates on a fixed spatial epsilon *and* a temporal gap, while this one
//! gates on the recomputed centroid alone, with duration enforced only in
//! the final filter.

use crate::config::Parameters;
use crate::error::{Error, Result};
use crate::geometry::{centroid, haversine_with_radius};
use crate::model::{Sample, Stop, UNASSIGNED_PLACE};

/// Scan `samples` and emit the ordered list of stops meeting
/// `parameters.min_stop_distance` and `parameters.min_stop_duration`.
///
/// An empty `samples` slice is not an error: it yields an empty list.
/// An out-of-order batch is: callers must sort before calling.
pub fn detect_stops(samples: &[Sample], parameters: &Parameters) -> Result<Vec<Stop>> {
    if samples.is_empty() {
        return Ok(Vec::new());
    }
    assert_non_decreasing(samples)?;

    let n = samples.len();
    let mut candidates = Vec::new();
    let mut i = 0usize;

    while i < n {
        let mut j = i + 1;
        let mut c = centroid(&locations(samples, i, j))?;

        while j < n && haversine_with_radius(&samples[j].location, &c, parameters.earth_radius)
            <= parameters.min_stop_distance
        {
            j += 1;
            c = centroid(&locations(samples, i, j))?;
        }

        candidates.push(Stop {
            location: c,
            arrival: samples[i].timestamp,
            departure: samples[j - 1].timestamp,
            place_id: UNASSIGNED_PLACE,
        });
        i = j;
    }

    let stops: Vec<Stop> = candidates
        .into_iter()
        .filter(|s| s.duration() >= parameters.min_stop_duration)
        .collect();

    tracing::debug!(
        input_samples = n,
        emitted_stops = stops.len(),
        "stop detector finished"
    );

    Ok(stops)
}

fn locations(samples: &[Sample], start: usize, end: usize) -> Vec<crate::geometry::Location> {
    samples[start..end].iter().map(|s| s.location).collect()
}

fn assert_non_decreasing(samples: &[Sample]) -> Result<()> {
    for idx in 1..samples.len() {
        if samples[idx].timestamp < samples[idx - 1].timestamp {
            return Err(Error::UnorderedSamples { index: idx });
        }
    }
    Ok(())
}
