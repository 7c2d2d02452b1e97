//! Availability checks
//!
//! Stays are half-open intervals [check_in, check_out): the checkout day
//! is not occupied, so back-to-back reservations on the same room are
//! allowed.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::db::repository::{self, RepoResult};

/// Whether two half-open [start, end) intervals intersect
pub fn intervals_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Whether any non-cancelled reservation on the room conflicts with the
/// requested stay. `exclude_id` skips one reservation, for re-checks on
/// an existing booking.
pub async fn has_conflict(
    pool: &SqlitePool,
    room_id: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
    exclude_id: Option<i64>,
) -> RepoResult<bool> {
    let count =
        repository::reservation::count_conflicts(pool, room_id, check_in, check_out, exclude_id)
            .await?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn overlapping_stays_conflict() {
        assert!(intervals_overlap(
            d("2025-03-01"),
            d("2025-03-05"),
            d("2025-03-03"),
            d("2025-03-07"),
        ));
    }

    #[test]
    fn containment_conflicts() {
        assert!(intervals_overlap(
            d("2025-03-01"),
            d("2025-03-10"),
            d("2025-03-03"),
            d("2025-03-05"),
        ));
    }

    #[test]
    fn identical_stays_conflict() {
        assert!(intervals_overlap(
            d("2025-03-01"),
            d("2025-03-05"),
            d("2025-03-01"),
            d("2025-03-05"),
        ));
    }

    #[test]
    fn back_to_back_does_not_conflict() {
        // checkout day frees the room for a same-day check-in
        assert!(!intervals_overlap(
            d("2025-03-01"),
            d("2025-03-05"),
            d("2025-03-05"),
            d("2025-03-08"),
        ));
        assert!(!intervals_overlap(
            d("2025-03-05"),
            d("2025-03-08"),
            d("2025-03-01"),
            d("2025-03-05"),
        ));
    }

    #[test]
    fn disjoint_stays_do_not_conflict() {
        assert!(!intervals_overlap(
            d("2025-03-01"),
            d("2025-03-03"),
            d("2025-03-10"),
            d("2025-03-12"),
        ));
    }
}
