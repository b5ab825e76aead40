//! Day aggregator — builds the hour × place occupancy matrix for one
//! calendar day, plus the derived quantities (`sum`, `home_place_id`,
//! `overlap`, `error`) later layered on by the feature extractor.
//!
//! Grounded on the temporal bucketing style of
//! `core/src/timeline/boundaries/algorithms/discrete.rs` (walking a
//! timestamp-ordered sequence and folding contributions into buckets), here
//! specialized to hour-of-day buckets per place rather than session spans.

use crate::error::{Error, Result};
use crate::model::{HourMatrix, Stop};
use chrono::{NaiveDate, Timelike};

/// Fold `stops` whose arrival falls on `day` into a 24 × `num_places`
/// occupancy matrix. `num_places` should be the total place count for the
/// processing window, not just the places visited on `day`, so that
/// columns line up across the days compared by `overlap`/`error`.
///
/// A stop whose arrival is on `day` but whose departure is on a different
/// calendar day is a precondition violation: callers must split stops at
/// midnight before aggregating.
pub fn build_hour_matrix(stops: &[Stop], day: NaiveDate, num_places: usize) -> Result<HourMatrix> {
    let mut matrix = HourMatrix::new(num_places);

    for (index, stop) in stops.iter().enumerate() {
        if stop.arrival.date_naive() != day {
            continue;
        }
        if stop.departure.date_naive() != day {
            return Err(Error::StraddlesMidnight { stop_index: index });
        }

        hour_slots(&mut matrix, stop);
    }

    Ok(matrix)
}

/// Per-stop contribution to the matrix ("hourSlots").
///
/// Adopts `arrival.hour`/`departure.hour` for the two boundary rows. A
/// sibling implementation that instead reuses `departure.hour` for both
/// is a known bug — not reproduced here.
fn hour_slots(matrix: &mut HourMatrix, stop: &Stop) {
    let place_id = stop.place_id;
    let arrival_hour = stop.arrival.hour() as usize;
    let departure_hour = stop.departure.hour() as usize;
    let arrival_minute_frac = stop.arrival.minute() as f64 / 60.0;
    let departure_minute_frac = stop.departure.minute() as f64 / 60.0;

    if arrival_hour == departure_hour {
        matrix.add(
            arrival_hour,
            place_id,
            departure_minute_frac - arrival_minute_frac,
        );
        return;
    }

    matrix.add(arrival_hour, place_id, 1.0 - arrival_minute_frac);
    for hour in (arrival_hour + 1)..departure_hour {
        matrix.add(hour, place_id, 1.0);
    }
    matrix.add(departure_hour, place_id, departure_minute_frac);
}

/// Sum of every cell in the matrix.
pub fn sum(matrix: &HourMatrix) -> f64 {
    matrix.cells.iter().flatten().sum()
}

/// The place with the greatest cumulative 00:00–06:00 occupancy, or `-1`
/// if the night-time sum is zero everywhere.
pub fn home_place_id(matrix: &HourMatrix) -> i32 {
    let mut best_place = -1i32;
    let mut best_sum = 0.0f64;

    for place in 0..matrix.num_places {
        let night_sum: f64 = (0..6).map(|h| matrix.cells[h][place]).sum();
        if night_sum > best_sum {
            best_sum = night_sum;
            best_place = place as i32;
        }
    }

    best_place
}

/// Occupancy overlap of two matrices, in `[0, 1]`; `-1` ("not comparable")
/// when either matrix's total occupancy is zero.
pub fn overlap(a: &HourMatrix, b: &HourMatrix) -> f64 {
    let sum_a = sum(a);
    let sum_b = sum(b);
    if sum_a == 0.0 || sum_b == 0.0 {
        return -1.0;
    }

    let places = a.num_places.max(b.num_places);
    let mut total_min = 0.0;
    for hour in 0..24 {
        for place in 0..places {
            let va = a.cells.get(hour).and_then(|row| row.get(place)).copied().unwrap_or(0.0);
            let vb = b.cells.get(hour).and_then(|row| row.get(place)).copied().unwrap_or(0.0);
            total_min += va.min(vb);
        }
    }

    total_min / sum_a.min(sum_b)
}

/// Mean absolute cell-wise difference between two matrices, normalized by
/// `24 * num_places`. Assumes both matrices were built against the same
/// place catalog.
pub fn error(a: &HourMatrix, b: &HourMatrix) -> f64 {
    let places = a.num_places.max(b.num_places);
    if places == 0 {
        return 0.0;
    }

    let mut total_abs = 0.0;
    for hour in 0..24 {
        for place in 0..places {
            let va = a.cells.get(hour).and_then(|row| row.get(place)).copied().unwrap_or(0.0);
            let vb = b.cells.get(hour).and_then(|row| row.get(place)).copied().unwrap_or(0.0);
            total_abs += (va - vb).abs();
        }
    }

    total_abs / (24.0 * places as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Location;
    use chrono::{TimeZone, Utc};

    fn stop(place_id: i32, arrival: (u32, u32), departure: (u32, u32)) -> Stop {
        let day = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap().date_naive();
        Stop {
            location: Location::new(0.0, 0.0).unwrap(),
            arrival: day.and_hms_opt(arrival.0, arrival.1, 0).unwrap().and_utc(),
            departure: day.and_hms_opt(departure.0, departure.1, 0).unwrap().and_utc(),
            place_id,
        }
    }

    fn day() -> NaiveDate {
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap().date_naive()
    }

    #[test]
    fn cells_are_bounded_and_rows_sum_within_one() {
        let stops = vec![stop(0, (9, 0), (11, 30)), stop(1, (13, 0), (13, 45))];
        let matrix = build_hour_matrix(&stops, day(), 2).unwrap();
        for row in &matrix.cells {
            let row_sum: f64 = row.iter().sum();
            assert!(row_sum <= 1.0 + 1e-9);
            for &cell in row {
                assert!((0.0..=1.0 + 1e-9).contains(&cell));
            }
        }
    }

    #[test]
    fn matrix_round_trips_total_duration_per_place() {
        let stops = vec![stop(0, (9, 0), (11, 30))];
        let matrix = build_hour_matrix(&stops, day(), 1).unwrap();
        let total_hours: f64 = matrix.cells.iter().map(|row| row[0]).sum();
        assert!((total_hours - 2.5).abs() < 1e-9);
    }

    #[test]
    fn straddling_midnight_is_rejected() {
        let d = day();
        let stop = Stop {
            location: Location::new(0.0, 0.0).unwrap(),
            arrival: d.and_hms_opt(23, 0, 0).unwrap().and_utc(),
            departure: (d + chrono::Duration::days(1)).and_hms_opt(1, 0, 0).unwrap().and_utc(),
            place_id: 0,
        };
        let err = build_hour_matrix(&[stop], d, 1).unwrap_err();
        assert!(matches!(err, Error::StraddlesMidnight { .. }));
    }

    #[test]
    fn overlap_of_matrix_with_itself_is_one() {
        let stops = vec![stop(0, (9, 0), (11, 0))];
        let matrix = build_hour_matrix(&stops, day(), 1).unwrap();
        assert!((overlap(&matrix, &matrix) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = build_hour_matrix(&[stop(0, (9, 0), (11, 0))], day(), 2).unwrap();
        let b = build_hour_matrix(&[stop(1, (9, 0), (10, 0))], day(), 2).unwrap();
        assert!((overlap(&a, &b) - overlap(&b, &a)).abs() < 1e-9);
    }

    #[test]
    fn overlap_of_zero_matrices_is_not_comparable() {
        let empty = HourMatrix::new(1);
        assert_eq!(overlap(&empty, &empty), -1.0);
    }

    #[test]
    fn home_place_is_greatest_nighttime_occupant() {
        let stops = vec![
            stop(0, (0, 30), (4, 0)),
            stop(1, (9, 0), (17, 0)),
        ];
        let matrix = build_hour_matrix(&stops, day(), 2).unwrap();
        assert_eq!(home_place_id(&matrix), 0);
    }

    #[test]
    fn home_place_is_none_without_nighttime_occupancy() {
        let stops = vec![stop(0, (9, 0), (17, 0))];
        let matrix = build_hour_matrix(&stops, day(), 1).unwrap();
        assert_eq!(home_place_id(&matrix), -1);
    }

    #[test]
    fn error_of_matrix_with_itself_is_zero() {
        let matrix = build_hour_matrix(&[stop(0, (9, 0), (11, 0))], day(), 1).unwrap();
        assert_eq!(error(&matrix, &matrix), 0.0);
    }

    #[test]
    fn error_reports_mean_absolute_cell_difference() {
        // 2 hours occupied at place 0 against an entirely empty matrix: two
        // cells differ by 1.0 each, spread over 24 hours * 1 place.
        let occupied = build_hour_matrix(&[stop(0, (9, 0), (11, 0))], day(), 1).unwrap();
        let empty = HourMatrix::new(1);
        let expected = 2.0 / 24.0;
        assert!((error(&occupied, &empty) - expected).abs() < 1e-9);
    }

    #[test]
    fn error_is_symmetric() {
        let a = build_hour_matrix(&[stop(0, (9, 0), (11, 0))], day(), 2).unwrap();
        let b = build_hour_matrix(&[stop(1, (9, 0), (10, 0))], day(), 2).unwrap();
        assert!((error(&a, &b) - error(&b, &a)).abs() < 1e-9);
    }
}
