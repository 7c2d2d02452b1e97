//! Room-Status Reconciler
//!
//! Recurring background pass that advances room and reservation status
//! based on elapsed time, independent of any request:
//!
//! 1. Occupy rooms for confirmed stays covering today.
//! 2. Check out stays past their checkout date (room to cleaning,
//!    reservation to completed).
//! 3. Return cleaned rooms to available after a 2 hour turnover window,
//!    unless a confirmed check-in is due within the next 24 hours.
//! 4. Auto-cancel pending reservations whose check-in is more than one
//!    day in the past.
//!
//! Each pass runs in a single transaction. A failed pass is logged and
//! retried on the next tick, never fatal.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use sqlx::SqlitePool;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::db::models::{ReservationStatus, RoomStatus};
use crate::db::repository::{RepoResult, reservation, room};
use crate::utils::time;

/// Minimum minutes a room stays in cleaning before turnover
const CLEANING_TURNOVER_MINUTES: i64 = 120;

/// Appended to the notes of auto-cancelled reservations
const AUTO_CANCEL_MARKER: &str = " [auto-cancelled: left unconfirmed past check-in]";

/// Whether a cleaning room has sat long enough to return to service
pub fn turnover_elapsed(last_status_change: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - last_status_change >= ChronoDuration::minutes(CLEANING_TURNOVER_MINUTES)
}

/// Counters for one reconciliation pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    pub activated: u32,
    pub checked_out: u32,
    pub turned_over: u32,
    pub auto_cancelled: u32,
}

impl PassReport {
    pub fn total(&self) -> u32 {
        self.activated + self.checked_out + self.turned_over + self.auto_cancelled
    }
}

/// Periodic reconciliation driver
///
/// Holds its own pool handle; the timer and cancellation token are
/// explicit so tests can drive single passes directly.
pub struct Reconciler {
    pool: SqlitePool,
    interval: Duration,
}

impl Reconciler {
    pub fn new(pool: SqlitePool, interval: Duration) -> Self {
        Self { pool, interval }
    }

    /// Run until cancelled: one pass immediately, then one per tick
    pub async fn run(self, shutdown: CancellationToken) {
        info!(interval_secs = self.interval.as_secs(), "Reconciler started");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.run_pass().await {
                        Ok(report) if report.total() > 0 => {
                            info!(
                                activated = report.activated,
                                checked_out = report.checked_out,
                                turned_over = report.turned_over,
                                auto_cancelled = report.auto_cancelled,
                                "Reconciliation pass applied changes"
                            );
                        }
                        Ok(_) => debug!("Reconciliation pass: nothing to do"),
                        Err(e) => error!(error = %e, "Reconciliation pass failed"),
                    }
                }
                _ = shutdown.cancelled() => {
                    info!("Reconciler stopping");
                    break;
                }
            }
        }
    }

    /// One reconciliation pass, atomically
    pub async fn run_pass(&self) -> RepoResult<PassReport> {
        let now = Utc::now();
        let today = time::today_utc();
        let mut report = PassReport::default();

        let mut tx = self.pool.begin().await?;

        // 1. Activate occupancy for confirmed stays covering today
        for row in reservation::due_for_activation(&mut *tx, today).await? {
            room::set_status(&mut *tx, row.room_id, RoomStatus::Occupied, now).await?;
            debug!(
                reservation_id = row.reservation_id,
                room = %row.room_number,
                "Room occupied for active stay"
            );
            report.activated += 1;
        }

        // 2. Check out stays whose checkout has passed
        for row in reservation::due_for_checkout(&mut *tx, today).await? {
            room::set_status(&mut *tx, row.room_id, RoomStatus::Cleaning, now).await?;
            if row.status != ReservationStatus::Completed {
                reservation::set_status(
                    &mut *tx,
                    row.reservation_id,
                    ReservationStatus::Completed,
                    now,
                )
                .await?;
            }
            debug!(
                reservation_id = row.reservation_id,
                room = %row.room_number,
                "Stay checked out, room sent to cleaning"
            );
            report.checked_out += 1;
        }

        // 3. Cleaning turnover back to available
        for cleaning_room in room::find_by_status(&mut *tx, RoomStatus::Cleaning).await? {
            if !turnover_elapsed(cleaning_room.updated_at, now) {
                continue;
            }
            if reservation::has_upcoming_checkin(&mut *tx, cleaning_room.id, today).await? {
                continue;
            }
            room::set_status(&mut *tx, cleaning_room.id, RoomStatus::Available, now).await?;
            debug!(room = %cleaning_room.room_number, "Cleaned room returned to service");
            report.turned_over += 1;
        }

        // 4. Expire stale pending reservations
        for stale in reservation::stale_pending(&mut *tx, today).await? {
            reservation::mark_auto_cancelled(&mut *tx, stale.id, AUTO_CANCEL_MARKER, now).await?;
            warn!(
                reservation_id = stale.id,
                check_in = %stale.check_in,
                "Auto-cancelled pending reservation past its check-in"
            );
            report.auto_cancelled += 1;
        }

        tx.commit().await?;
        Ok(report)
    }
}
