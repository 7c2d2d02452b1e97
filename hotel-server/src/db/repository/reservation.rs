//! Reservation Repository
//!
//! Booking queries (conflict detection, detail joins) plus the scan
//! queries the reconciler runs each pass.

use super::{RepoError, RepoResult};
use crate::db::models::{Reservation, ReservationDetails, ReservationStatus};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, room_id, guest_id, check_in, check_out, num_guests, status, \
     price_per_night, total_price, notes, created_by, cancelled_by, cancelled_at, created_at, updated_at";

const DETAILS_QUERY: &str = "SELECT r.id, r.room_id, r.guest_id, r.check_in, r.check_out, \
     CAST(julianday(r.check_out) - julianday(r.check_in) AS INTEGER) AS nights, \
     r.num_guests, r.status, r.price_per_night, r.total_price, r.notes, \
     rm.room_number, rt.name AS room_type_name, \
     g.first_name || ' ' || g.last_name AS guest_name, r.created_at \
     FROM reservation r \
     JOIN room rm ON rm.id = r.room_id \
     JOIN room_type rt ON rt.id = rm.room_type_id \
     JOIN guest g ON g.id = r.guest_id";

/// Insert record for a validated, priced reservation
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub room_id: i64,
    pub guest_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub num_guests: i64,
    pub status: ReservationStatus,
    pub price_per_night: f64,
    pub total_price: f64,
    pub notes: Option<String>,
    pub created_by: i64,
}

/// Row shape shared by the reconciler scan queries
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReconcileRow {
    pub reservation_id: i64,
    pub room_id: i64,
    pub room_number: String,
    pub status: ReservationStatus,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let reservation = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {COLUMNS} FROM reservation WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(reservation)
}

/// Reservation with joined display fields and derived nights
pub async fn details_by_id(
    pool: &SqlitePool,
    id: i64,
) -> RepoResult<Option<ReservationDetails>> {
    let details =
        sqlx::query_as::<_, ReservationDetails>(&format!("{DETAILS_QUERY} WHERE r.id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(details)
}

/// All reservations, newest first
pub async fn list_details(pool: &SqlitePool) -> RepoResult<Vec<ReservationDetails>> {
    let details = sqlx::query_as::<_, ReservationDetails>(&format!(
        "{DETAILS_QUERY} ORDER BY r.created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(details)
}

/// Count non-cancelled reservations on the room whose half-open stay
/// intersects [check_in, check_out)
pub async fn count_conflicts(
    ex: impl sqlx::SqliteExecutor<'_>,
    room_id: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
    exclude_id: Option<i64>,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM reservation \
         WHERE room_id = ? AND status <> 'cancelled' \
         AND check_in < ? AND check_out > ? \
         AND id <> COALESCE(?, -1)",
    )
    .bind(room_id)
    .bind(check_out)
    .bind(check_in)
    .bind(exclude_id)
    .fetch_one(ex)
    .await?;
    Ok(count)
}

pub async fn insert(
    ex: impl sqlx::SqliteExecutor<'_>,
    data: &NewReservation,
    now: DateTime<Utc>,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO reservation (room_id, guest_id, check_in, check_out, num_guests, status, \
         price_per_night, total_price, notes, created_by, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.room_id)
    .bind(data.guest_id)
    .bind(data.check_in)
    .bind(data.check_out)
    .bind(data.num_guests)
    .bind(data.status)
    .bind(data.price_per_night)
    .bind(data.total_price)
    .bind(&data.notes)
    .bind(data.created_by)
    .bind(now)
    .bind(now)
    .fetch_one(ex)
    .await?;
    Ok(id)
}

pub async fn set_status(
    ex: impl sqlx::SqliteExecutor<'_>,
    id: i64,
    status: ReservationStatus,
    now: DateTime<Utc>,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE reservation SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(ex)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reservation {id} not found")));
    }
    Ok(())
}

/// Mark cancelled and record who/when
pub async fn mark_cancelled(
    ex: impl sqlx::SqliteExecutor<'_>,
    id: i64,
    cancelled_by: i64,
    now: DateTime<Utc>,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE reservation SET status = 'cancelled', cancelled_by = ?, cancelled_at = ?, updated_at = ? WHERE id = ?",
    )
    .bind(cancelled_by)
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(ex)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reservation {id} not found")));
    }
    Ok(())
}

/// Auto-cancel a stale pending reservation, appending the marker to notes
pub async fn mark_auto_cancelled(
    ex: impl sqlx::SqliteExecutor<'_>,
    id: i64,
    marker: &str,
    now: DateTime<Utc>,
) -> RepoResult<()> {
    sqlx::query(
        "UPDATE reservation SET status = 'cancelled', cancelled_at = ?, \
         notes = COALESCE(notes, '') || ?, updated_at = ? WHERE id = ?",
    )
    .bind(now)
    .bind(marker)
    .bind(now)
    .bind(id)
    .execute(ex)
    .await?;
    Ok(())
}

// ========== Reconciler scan queries ==========

/// Confirmed reservations covering today whose room is not yet occupied
pub async fn due_for_activation(
    ex: impl sqlx::SqliteExecutor<'_>,
    today: NaiveDate,
) -> RepoResult<Vec<ReconcileRow>> {
    let rows = sqlx::query_as::<_, ReconcileRow>(
        "SELECT r.id AS reservation_id, r.room_id, rm.room_number, r.status \
         FROM reservation r JOIN room rm ON rm.id = r.room_id \
         WHERE r.status = 'confirmed' AND r.check_in <= ? AND r.check_out > ? \
         AND rm.status <> 'occupied'",
    )
    .bind(today)
    .bind(today)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// Reservations past checkout whose room is still occupied
pub async fn due_for_checkout(
    ex: impl sqlx::SqliteExecutor<'_>,
    today: NaiveDate,
) -> RepoResult<Vec<ReconcileRow>> {
    let rows = sqlx::query_as::<_, ReconcileRow>(
        "SELECT r.id AS reservation_id, r.room_id, rm.room_number, r.status \
         FROM reservation r JOIN room rm ON rm.id = r.room_id \
         WHERE r.status IN ('confirmed', 'completed') AND r.check_out <= ? \
         AND rm.status = 'occupied'",
    )
    .bind(today)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// Whether a confirmed reservation checks in within the next 24 hours
/// (tomorrow, date-wise; a check-in today is handled by activation)
pub async fn has_upcoming_checkin(
    ex: impl sqlx::SqliteExecutor<'_>,
    room_id: i64,
    today: NaiveDate,
) -> RepoResult<bool> {
    let tomorrow = today.succ_opt().unwrap_or(today);
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM reservation \
         WHERE room_id = ? AND status = 'confirmed' AND check_in > ? AND check_in <= ?",
    )
    .bind(room_id)
    .bind(today)
    .bind(tomorrow)
    .fetch_one(ex)
    .await?;
    Ok(count > 0)
}

/// Pending reservations whose check-in is more than one day in the past
pub async fn stale_pending(
    ex: impl sqlx::SqliteExecutor<'_>,
    today: NaiveDate,
) -> RepoResult<Vec<Reservation>> {
    let cutoff = today - chrono::Duration::days(1);
    let rows = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {COLUMNS} FROM reservation WHERE status = 'pending' AND check_in < ?"
    ))
    .bind(cutoff)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}
