//! Move reconstructor
//!
//! Walks the stops in chronological order, threading the underlying sample
//! stream between them so that the reported distance is the cumulative
//! path length actually traveled rather than the chord between two stop
//! centroids — the same "don't trust the endpoints, trust the path"
//! posture as the path-aware clustering in
//! `core/src/transforms/enrich/location/visit_clustering.rs`.

use crate::config::Parameters;
use crate::error::Result;
use crate::geometry::haversine_with_radius;
use crate::model::{Move, Sample, Stop, UNASSIGNED_PLACE};

/// Reconstruct the ordered list of moves between `stops`, threading
/// `samples`, filtered by `parameters.min_move_duration`.
pub fn reconstruct_moves(
    samples: &[Sample],
    stops: &[Stop],
    parameters: &Parameters,
) -> Result<Vec<Move>> {
    if samples.is_empty() || stops.is_empty() {
        return Ok(Vec::new());
    }

    let mut raw = Vec::new();
    let mut departure = samples[0].timestamp;
    let mut prev_place_id = UNASSIGNED_PLACE;

    for stop in stops {
        let path: Vec<&Sample> = samples
            .iter()
            .filter(|s| s.timestamp >= departure && s.timestamp <= stop.arrival)
            .collect();

        if !path.is_empty() {
            let distance = path_distance(&path, parameters);
            raw.push(Move {
                location_from: path.first().unwrap().location,
                location_to: path.last().unwrap().location,
                place_from: prev_place_id,
                place_to: stop.place_id,
                departure,
                arrival: stop.arrival,
                distance,
            });
            departure = stop.departure;
            prev_place_id = stop.place_id;
        } else {
            let tail: Vec<&Sample> = samples.iter().filter(|s| s.timestamp >= departure).collect();
            if !tail.is_empty() {
                let distance = path_distance(&tail, parameters);
                let arrival = tail.iter().map(|s| s.timestamp).max().unwrap();
                raw.push(Move {
                    location_from: tail.first().unwrap().location,
                    location_to: tail.last().unwrap().location,
                    place_from: prev_place_id,
                    place_to: UNASSIGNED_PLACE,
                    departure,
                    arrival,
                    distance,
                });
            }
            break;
        }
    }

    let moves: Vec<Move> = raw
        .into_iter()
        .filter(|m| m.duration() >= parameters.min_move_duration)
        .collect();

    tracing::debug!(move_count = moves.len(), "move reconstructor finished");

    Ok(moves)
}

fn path_distance(path: &[&Sample], parameters: &Parameters) -> f64 {
    path.windows(2)
        .map(|w| haversine_with_radius(&w[0].location, &w[1].location, parameters.earth_radius))
        .sum()
}
