//! Place clusterer
//!
//! Density-based clustering (DBSCAN) over stop centroids with
//! `epsilon = min_place_distance` and `minPoints = 1`. With `minPoints = 1`
//! every stop is a core point, so the result is exactly the partition of
//! stops into connected components of the ε-neighbor graph — implemented
//! here as union-find over pairwise great-circle distance, which is
//! simpler than (and equivalent to) running a general DBSCAN at this
//! `minPoints` value.
//!
//! Generalized from the cluster-expansion style of
//! `core/src/transforms/enrich/location/visit_clustering.rs`, moving from
//! that module's combined spatial+temporal gating to a pure spatial
//! epsilon.

use crate::config::Parameters;
use crate::error::Result;
use crate::geometry::{centroid, haversine_with_radius};
use crate::model::{Place, Stop};

struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}

/// Assign each stop a non-negative `place_id` (or leave it as noise —
/// unreachable with `minPoints = 1`, but the label is preserved for
/// consistency with general DBSCAN semantics) and return the places.
pub fn cluster_places(stops: &mut [Stop], parameters: &Parameters) -> Result<Vec<Place>> {
    let n = stops.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut uf = UnionFind::new(n);
    for i in 0..n {
        for j in (i + 1)..n {
            let d = haversine_with_radius(
                &stops[i].location,
                &stops[j].location,
                parameters.earth_radius,
            );
            if d <= parameters.min_place_distance {
                uf.union(i, j);
            }
        }
    }

    // Assign dense cluster ids in first-seen order, so label 0 is the
    // cluster containing the first stop, etc. Determinism is only
    // guaranteed within this run.
    let mut label_of_root: Vec<Option<i32>> = vec![None; n];
    let mut next_label = 0i32;
    let mut cluster_members: Vec<Vec<usize>> = Vec::new();

    for i in 0..n {
        let root = uf.find(i);
        let label = match label_of_root[root] {
            Some(l) => l,
            None => {
                let l = next_label;
                label_of_root[root] = Some(l);
                next_label += 1;
                cluster_members.push(Vec::new());
                l
            }
        };
        stops[i].place_id = label;
        cluster_members[label as usize].push(i);
    }

    let mut places = Vec::with_capacity(cluster_members.len());
    for (label, members) in cluster_members.into_iter().enumerate() {
        let locations: Vec<_> = members.iter().map(|&idx| stops[idx].location).collect();
        let location = centroid(&locations)?;
        let total_duration_seconds: f64 = members
            .iter()
            .map(|&idx| stops[idx].duration().num_milliseconds() as f64 / 1000.0)
            .sum();

        places.push(Place {
            id: label as i32,
            location,
            total_duration_seconds,
        });
    }

    tracing::debug!(
        input_stops = n,
        place_count = places.len(),
        "place clusterer finished"
    );

    Ok(places)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Location;
    use chrono::{TimeZone, Utc};

    fn stop(lat: f64, lon: f64, arrival_min: i64, departure_min: i64) -> Stop {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        Stop {
            location: Location::new(lat, lon).unwrap(),
            arrival: base + chrono::Duration::minutes(arrival_min),
            departure: base + chrono::Duration::minutes(departure_min),
            place_id: crate::model::UNASSIGNED_PLACE,
        }
    }

    #[test]
    fn empty_stops_yield_no_places() {
        let mut stops: Vec<Stop> = Vec::new();
        let places = cluster_places(&mut stops, &Parameters::default()).unwrap();
        assert!(places.is_empty());
    }

    #[test]
    fn nearby_stops_form_one_place() {
        let mut stops = vec![
            stop(55.7000, 12.5500, 0, 10),
            stop(55.70001, 12.55001, 20, 30),
        ];
        let places = cluster_places(&mut stops, &Parameters::default()).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(stops[0].place_id, 0);
        assert_eq!(stops[1].place_id, 0);
        assert_eq!(places[0].total_duration_seconds, 20.0 * 60.0);
    }

    #[test]
    fn distant_stops_form_separate_places() {
        let mut stops = vec![stop(55.7000, 12.5500, 0, 10), stop(55.8000, 12.6000, 20, 30)];
        let places = cluster_places(&mut stops, &Parameters::default()).unwrap();
        assert_eq!(places.len(), 2);
        assert_ne!(stops[0].place_id, stops[1].place_id);
    }

    #[test]
    fn every_non_noise_stop_has_a_matching_place() {
        let mut stops = vec![
            stop(55.7000, 12.5500, 0, 10),
            stop(55.8000, 12.6000, 20, 30),
            stop(55.70002, 12.55002, 40, 50),
        ];
        let places = cluster_places(&mut stops, &Parameters::default()).unwrap();
        for s in &stops {
            assert!(s.place_id >= 0);
            assert!(places.iter().any(|p| p.id == s.place_id));
        }
    }
}
