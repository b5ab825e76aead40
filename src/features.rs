//! Feature extractor
//!
//! Consumes the full stop/place/move/sample set for a rolling window plus
//! the history of daily occupancy matrices already built for that window,
//! and derives the scalar feature record for a single target day.
//!
//! A minimal interface sketch for `extract_features` would read
//! `(day, stops, places, moves, history_matrices) -> Features`, but
//! `locationVarianceDaily` is explicitly defined over raw samples, which
//! that signature omits. This crate takes `samples` as an explicit
//! parameter rather than silently dropping the feature.

use crate::day::{build_hour_matrix, home_place_id, overlap, sum};
use crate::error::Result;
use crate::model::{Features, HourMatrix, Move, Place, Sample, Stop};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Derive the feature record for `day`.
///
/// `stops_all`/`moves_all`/`samples_all` may span the whole rolling window
/// (up to 28 days is typical); only the records relevant to `day`
/// are folded into the day-scoped quantities. `places_all` is used only
/// for its count, to size `day`'s hour matrix consistently with
/// `history_matrices`.
pub fn extract_features(
    day: NaiveDate,
    stops_all: &[Stop],
    places_all: &[Place],
    moves_all: &[Move],
    samples_all: &[Sample],
    history_matrices: &[HourMatrix],
) -> Result<Features> {
    let num_places = places_all.len();
    let matrix = build_hour_matrix(stops_all, day, num_places)?;

    let number_of_places_daily = distinct_places_on_day(stops_all, day);
    let home_stay_daily = home_stay(&matrix);
    let total_distance_daily = total_distance(moves_all, day);
    let location_variance_daily = location_variance(samples_all, day);
    let entropy_daily = entropy(&matrix);
    let normalized_entropy_daily = if number_of_places_daily <= 1 {
        0.0
    } else {
        entropy_daily / (number_of_places_daily as f64).ln()
    };
    let routine_index_daily = routine_index(&matrix, history_matrices);

    Ok(Features {
        day,
        number_of_places_daily,
        home_stay_daily,
        total_distance_daily,
        location_variance_daily,
        entropy_daily,
        normalized_entropy_daily,
        routine_index_daily,
        hour_matrix_daily: matrix,
    })
}

fn distinct_places_on_day(stops: &[Stop], day: NaiveDate) -> usize {
    let mut seen = HashSet::new();
    for stop in stops {
        if stop.arrival.date_naive() == day && stop.place_id >= 0 {
            seen.insert(stop.place_id);
        }
    }
    seen.len()
}

fn home_stay(matrix: &HourMatrix) -> f64 {
    let home_id = home_place_id(matrix);
    let total = sum(matrix);
    if home_id < 0 || total == 0.0 {
        return -1.0;
    }

    let home_total: f64 = matrix.cells.iter().map(|row| row[home_id as usize]).sum();
    home_total / total
}

fn total_distance(moves: &[Move], day: NaiveDate) -> f64 {
    moves
        .iter()
        .filter(|m| m.departure.date_naive() == day)
        .map(|m| m.distance)
        .sum()
}

fn location_variance(samples: &[Sample], day: NaiveDate) -> f64 {
    let today: Vec<&Sample> = samples
        .iter()
        .filter(|s| s.timestamp.date_naive() == day)
        .collect();

    if today.len() < 2 {
        return 0.0;
    }

    let n = today.len() as f64;
    let mean_lat: f64 = today.iter().map(|s| s.location.latitude).sum::<f64>() / n;
    let mean_lon: f64 = today.iter().map(|s| s.location.longitude).sum::<f64>() / n;

    let var_lat: f64 = today
        .iter()
        .map(|s| (s.location.latitude - mean_lat).powi(2))
        .sum::<f64>()
        / n;
    let var_lon: f64 = today
        .iter()
        .map(|s| (s.location.longitude - mean_lon).powi(2))
        .sum::<f64>()
        / n;

    (var_lat + var_lon + 1.0).ln()
}

fn entropy(matrix: &HourMatrix) -> f64 {
    let total = sum(matrix);
    if total == 0.0 {
        return 0.0;
    }

    let durations: Vec<f64> = (0..matrix.num_places)
        .map(|place| matrix.cells.iter().map(|row| row[place]).sum::<f64>())
        .filter(|&d| d > 0.0)
        .collect();

    if durations.len() <= 1 {
        return 0.0;
    }

    -durations
        .iter()
        .map(|&d| {
            let p = d / total;
            p * p.ln()
        })
        .sum::<f64>()
}

fn routine_index(today: &HourMatrix, history: &[HourMatrix]) -> f64 {
    let overlaps: Vec<f64> = history
        .iter()
        .map(|past| overlap(today, past))
        .filter(|&o| o >= 0.0)
        .collect();

    if overlaps.is_empty() {
        return -1.0;
    }

    overlaps.iter().sum::<f64>() / overlaps.len() as f64
}
