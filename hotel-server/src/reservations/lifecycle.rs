//! Reservation Lifecycle Manager
//!
//! Orchestrates creation, confirmation and cancellation. All domain
//! checks run before any mutation; the mutation group (reservation row
//! plus room status side effect) commits in one transaction.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tracing::info;

use crate::db::models::{ReservationCreate, ReservationDetails, ReservationStatus, RoomStatus};
use crate::db::repository::{guest, reservation, room};
use crate::pricing::PricingResolver;
use crate::reservations::availability;
use crate::utils::{AppError, AppResult, time};

/// Per-room advisory locks
///
/// Serializes the conflict-check / price / insert sequence for one room
/// so two concurrent requests cannot both pass the availability check.
#[derive(Debug, Default)]
pub struct RoomLocks {
    locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl RoomLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    pub fn lock_for(&self, room_id: i64) -> Arc<Mutex<()>> {
        self.locks
            .entry(room_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Initial status: immediate-occupancy bookings skip the confirmation step
pub fn initial_status(check_in: NaiveDate, today: NaiveDate) -> ReservationStatus {
    if check_in <= today {
        ReservationStatus::Confirmed
    } else {
        ReservationStatus::Pending
    }
}

#[derive(Clone)]
pub struct ReservationService {
    pool: SqlitePool,
    pricing: PricingResolver,
    locks: Arc<RoomLocks>,
}

impl ReservationService {
    pub fn new(pool: SqlitePool, pricing: PricingResolver, locks: Arc<RoomLocks>) -> Self {
        Self {
            pool,
            pricing,
            locks,
        }
    }

    pub async fn get(&self, id: i64) -> AppResult<ReservationDetails> {
        reservation::details_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))
    }

    pub async fn list(&self) -> AppResult<Vec<ReservationDetails>> {
        Ok(reservation::list_details(&self.pool).await?)
    }

    /// Create a reservation: validate references and dates, check
    /// availability, price every night, persist, and occupy the room if
    /// the stay starts today or earlier.
    pub async fn create(
        &self,
        data: ReservationCreate,
        created_by: i64,
    ) -> AppResult<ReservationDetails> {
        if data.check_out <= data.check_in {
            return Err(AppError::validation(
                "check_out must be after check_in".to_string(),
            ));
        }
        let num_guests = data.num_guests.unwrap_or(1);
        if num_guests < 1 {
            return Err(AppError::validation(
                "num_guests must be at least 1".to_string(),
            ));
        }

        let room = room::find_by_id(&self.pool, data.room_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {} not found", data.room_id)))?;
        guest::find_by_id(&self.pool, data.guest_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Guest {} not found", data.guest_id)))?;

        // Hold the room lock from conflict check through insert
        let lock = self.locks.lock_for(room.id);
        let _guard = lock.lock().await;

        if availability::has_conflict(&self.pool, room.id, data.check_in, data.check_out, None)
            .await?
        {
            return Err(AppError::conflict(format!(
                "Room {} is already reserved between {} and {}",
                room.room_number, data.check_in, data.check_out
            )));
        }

        let quote = self
            .pricing
            .quote_stay(room.id, data.check_in, data.check_out)
            .await?;
        if quote.total_price <= 0.0 {
            return Err(AppError::validation(format!(
                "Total price must be positive, got {} for room {}",
                quote.total_price, room.room_number
            )));
        }

        let today = time::today_utc();
        let status = initial_status(data.check_in, today);
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;
        let id = reservation::insert(
            &mut *tx,
            &reservation::NewReservation {
                room_id: room.id,
                guest_id: data.guest_id,
                check_in: data.check_in,
                check_out: data.check_out,
                num_guests,
                status,
                price_per_night: quote.price_per_night,
                total_price: quote.total_price,
                notes: data.notes,
                created_by,
            },
            now,
        )
        .await?;

        if status == ReservationStatus::Confirmed
            && data.check_in <= today
            && today < data.check_out
        {
            room::set_status(&mut *tx, room.id, RoomStatus::Occupied, now).await?;
        }
        tx.commit().await?;

        info!(
            reservation_id = id,
            room = %room.room_number,
            check_in = %data.check_in,
            check_out = %data.check_out,
            status = %status,
            total = quote.total_price,
            "Reservation created"
        );

        self.get(id).await
    }

    /// Confirm a pending reservation; occupies the room when the stay
    /// already covers today.
    pub async fn confirm(&self, id: i64, by_user: i64) -> AppResult<ReservationDetails> {
        let existing = reservation::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))?;
        if existing.status != ReservationStatus::Pending {
            return Err(AppError::business_rule(format!(
                "Reservation {id} is {}, only pending reservations can be confirmed",
                existing.status
            )));
        }

        let today = time::today_utc();
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;
        reservation::set_status(&mut *tx, id, ReservationStatus::Confirmed, now).await?;
        if existing.covers(today) {
            room::set_status(&mut *tx, existing.room_id, RoomStatus::Occupied, now).await?;
        }
        tx.commit().await?;

        info!(reservation_id = id, by_user, "Reservation confirmed");
        self.get(id).await
    }

    /// Cancel a pending or confirmed reservation, recording who and when.
    /// An occupied room is demoted to cleaning for turnover; any other
    /// room status is left alone.
    pub async fn cancel(&self, id: i64, by_user: i64) -> AppResult<ReservationDetails> {
        let existing = reservation::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))?;
        if existing.status.is_terminal() {
            let reason = if existing.status == ReservationStatus::Cancelled {
                format!("Reservation {id} is already cancelled")
            } else {
                format!("Reservation {id} is completed and can no longer be cancelled")
            };
            return Err(AppError::business_rule(reason));
        }

        let room = room::find_by_id(&self.pool, existing.room_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {} not found", existing.room_id)))?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        reservation::mark_cancelled(&mut *tx, id, by_user, now).await?;
        if room.status == RoomStatus::Occupied {
            room::set_status(&mut *tx, room.id, RoomStatus::Cleaning, now).await?;
        }
        tx.commit().await?;

        info!(reservation_id = id, by_user, "Reservation cancelled");
        self.get(id).await
    }
}
