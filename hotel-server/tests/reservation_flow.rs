//! Reservation lifecycle: creation, conflicts, confirm and cancel

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use common::{seed_guest, seed_room, seed_room_type, test_pool};
use hotel_server::db::models::{ReservationCreate, ReservationStatus, RoomStatus};
use hotel_server::db::repository::{reservation, room};
use hotel_server::utils::AppError;
use hotel_server::{PricingResolver, ReservationService, RoomLocks};
use sqlx::SqlitePool;

fn service(pool: &SqlitePool) -> ReservationService {
    ReservationService::new(
        pool.clone(),
        PricingResolver::new(pool.clone()),
        Arc::new(RoomLocks::new()),
    )
}

fn create_payload(
    room_id: i64,
    guest_id: i64,
    check_in: chrono::NaiveDate,
    check_out: chrono::NaiveDate,
) -> ReservationCreate {
    ReservationCreate {
        room_id,
        guest_id,
        check_in,
        check_out,
        num_guests: Some(2),
        notes: None,
    }
}

#[tokio::test]
async fn future_booking_starts_pending_and_leaves_room_alone() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.2).await;
    let room_row = seed_room(&pool, "101", rt.id, 100.0).await;
    let guest = seed_guest(&pool, "Ana", "Lopez").await;

    let today = Utc::now().date_naive();
    let created = service(&pool)
        .create(
            create_payload(
                room_row.id,
                guest.id,
                today + Duration::days(5),
                today + Duration::days(8),
            ),
            7,
        )
        .await
        .unwrap();

    assert_eq!(created.status, ReservationStatus::Pending);
    assert_eq!(created.nights, 3);
    assert_eq!(created.price_per_night, 120.0);
    assert_eq!(created.total_price, 360.0);
    assert_eq!(created.guest_name, "Ana Lopez");

    let room_row = room::find_by_id(&pool, room_row.id).await.unwrap().unwrap();
    assert_eq!(room_row.status, RoomStatus::Available);

    let stored = reservation::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.created_by, 7);
}

#[tokio::test]
async fn same_day_booking_is_confirmed_and_occupies_the_room() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.0).await;
    let room_row = seed_room(&pool, "101", rt.id, 80.0).await;
    let guest = seed_guest(&pool, "Ana", "Lopez").await;

    let today = Utc::now().date_naive();
    let created = service(&pool)
        .create(
            create_payload(room_row.id, guest.id, today, today + Duration::days(2)),
            1,
        )
        .await
        .unwrap();

    assert_eq!(created.status, ReservationStatus::Confirmed);
    let room_row = room::find_by_id(&pool, room_row.id).await.unwrap().unwrap();
    assert_eq!(room_row.status, RoomStatus::Occupied);
}

#[tokio::test]
async fn overlapping_booking_is_rejected_with_conflict() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.0).await;
    let room_row = seed_room(&pool, "101", rt.id, 80.0).await;
    let guest = seed_guest(&pool, "Ana", "Lopez").await;
    let other = seed_guest(&pool, "Ben", "Kim").await;

    let today = Utc::now().date_naive();
    let svc = service(&pool);
    svc.create(
        create_payload(
            room_row.id,
            guest.id,
            today + Duration::days(3),
            today + Duration::days(7),
        ),
        1,
    )
    .await
    .unwrap();

    let err = svc
        .create(
            create_payload(
                room_row.id,
                other.id,
                today + Duration::days(5),
                today + Duration::days(9),
            ),
            1,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn back_to_back_bookings_share_the_turnover_day() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.0).await;
    let room_row = seed_room(&pool, "101", rt.id, 80.0).await;
    let guest = seed_guest(&pool, "Ana", "Lopez").await;

    let today = Utc::now().date_naive();
    let svc = service(&pool);
    svc.create(
        create_payload(
            room_row.id,
            guest.id,
            today + Duration::days(3),
            today + Duration::days(5),
        ),
        1,
    )
    .await
    .unwrap();

    // check-in on the previous booking's checkout day is allowed
    svc.create(
        create_payload(
            room_row.id,
            guest.id,
            today + Duration::days(5),
            today + Duration::days(7),
        ),
        1,
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn cancelled_booking_frees_its_dates() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.0).await;
    let room_row = seed_room(&pool, "101", rt.id, 80.0).await;
    let guest = seed_guest(&pool, "Ana", "Lopez").await;

    let today = Utc::now().date_naive();
    let svc = service(&pool);
    let first = svc
        .create(
            create_payload(
                room_row.id,
                guest.id,
                today + Duration::days(3),
                today + Duration::days(5),
            ),
            1,
        )
        .await
        .unwrap();
    svc.cancel(first.id, 1).await.unwrap();

    // same dates can be booked again
    svc.create(
        create_payload(
            room_row.id,
            guest.id,
            today + Duration::days(3),
            today + Duration::days(5),
        ),
        1,
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn invalid_dates_and_missing_references_are_rejected() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.0).await;
    let room_row = seed_room(&pool, "101", rt.id, 80.0).await;
    let guest = seed_guest(&pool, "Ana", "Lopez").await;

    let today = Utc::now().date_naive();
    let svc = service(&pool);

    let err = svc
        .create(create_payload(room_row.id, guest.id, today, today), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = svc
        .create(
            create_payload(9999, guest.id, today, today + Duration::days(1)),
            1,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = svc
        .create(
            create_payload(room_row.id, 9999, today, today + Duration::days(1)),
            1,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let mut payload = create_payload(room_row.id, guest.id, today, today + Duration::days(1));
    payload.num_guests = Some(0);
    let err = svc.create(payload, 1).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn zero_priced_room_cannot_be_reserved() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.2).await;
    let room_row = seed_room(&pool, "101", rt.id, 0.0).await;
    let guest = seed_guest(&pool, "Ana", "Lopez").await;

    let today = Utc::now().date_naive();
    let svc = service(&pool);
    let err = svc
        .create(
            create_payload(
                room_row.id,
                guest.id,
                today + Duration::days(1),
                today + Duration::days(3),
            ),
            1,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(svc.list().await.unwrap().is_empty(), "nothing persisted");
}

#[tokio::test]
async fn confirm_promotes_pending_and_occupies_when_stay_covers_today() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.0).await;
    let room_row = seed_room(&pool, "101", rt.id, 80.0).await;
    let guest = seed_guest(&pool, "Ana", "Lopez").await;

    let today = Utc::now().date_naive();
    let svc = service(&pool);

    // future booking: confirm flips status, room untouched
    let future = svc
        .create(
            create_payload(
                room_row.id,
                guest.id,
                today + Duration::days(5),
                today + Duration::days(7),
            ),
            1,
        )
        .await
        .unwrap();
    let confirmed = svc.confirm(future.id, 2).await.unwrap();
    assert_eq!(confirmed.status, ReservationStatus::Confirmed);
    let room_after = room::find_by_id(&pool, room_row.id).await.unwrap().unwrap();
    assert_eq!(room_after.status, RoomStatus::Available);

    // pending row whose stay covers today: confirming occupies the room
    let id = reservation::insert(
        &pool,
        &reservation::NewReservation {
            room_id: room_row.id,
            guest_id: guest.id,
            check_in: today,
            check_out: today + Duration::days(2),
            num_guests: 1,
            status: ReservationStatus::Pending,
            price_per_night: 80.0,
            total_price: 160.0,
            notes: None,
            created_by: 1,
        },
        Utc::now(),
    )
    .await
    .unwrap();
    svc.confirm(id, 2).await.unwrap();
    let room_after = room::find_by_id(&pool, room_row.id).await.unwrap().unwrap();
    assert_eq!(room_after.status, RoomStatus::Occupied);
}

#[tokio::test]
async fn confirm_rejects_non_pending_states() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.0).await;
    let room_row = seed_room(&pool, "101", rt.id, 80.0).await;
    let guest = seed_guest(&pool, "Ana", "Lopez").await;

    let today = Utc::now().date_naive();
    let svc = service(&pool);
    let booking = svc
        .create(
            create_payload(
                room_row.id,
                guest.id,
                today + Duration::days(5),
                today + Duration::days(7),
            ),
            1,
        )
        .await
        .unwrap();

    svc.confirm(booking.id, 1).await.unwrap();
    let err = svc.confirm(booking.id, 1).await.unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));

    svc.cancel(booking.id, 1).await.unwrap();
    let err = svc.confirm(booking.id, 1).await.unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));

    let err = svc.confirm(9999, 1).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn cancel_records_actor_and_demotes_occupied_room_to_cleaning() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.0).await;
    let room_row = seed_room(&pool, "101", rt.id, 80.0).await;
    let guest = seed_guest(&pool, "Ana", "Lopez").await;

    let today = Utc::now().date_naive();
    let svc = service(&pool);
    let booking = svc
        .create(
            create_payload(room_row.id, guest.id, today, today + Duration::days(2)),
            1,
        )
        .await
        .unwrap();
    let room_after = room::find_by_id(&pool, room_row.id).await.unwrap().unwrap();
    assert_eq!(room_after.status, RoomStatus::Occupied);

    let cancelled = svc.cancel(booking.id, 42).await.unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);

    // occupied rooms go to cleaning, never straight back to available
    let room_after = room::find_by_id(&pool, room_row.id).await.unwrap().unwrap();
    assert_eq!(room_after.status, RoomStatus::Cleaning);

    let stored = reservation::find_by_id(&pool, booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.cancelled_by, Some(42));
    assert!(stored.cancelled_at.is_some());
}

#[tokio::test]
async fn cancelling_a_future_booking_leaves_the_room_available() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.0).await;
    let room_row = seed_room(&pool, "101", rt.id, 80.0).await;
    let guest = seed_guest(&pool, "Ana", "Lopez").await;

    let today = Utc::now().date_naive();
    let svc = service(&pool);
    let booking = svc
        .create(
            create_payload(
                room_row.id,
                guest.id,
                today + Duration::days(5),
                today + Duration::days(7),
            ),
            1,
        )
        .await
        .unwrap();
    svc.cancel(booking.id, 1).await.unwrap();

    let room_after = room::find_by_id(&pool, room_row.id).await.unwrap().unwrap();
    assert_eq!(room_after.status, RoomStatus::Available);
}

#[tokio::test]
async fn cancel_is_rejected_on_terminal_states() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.0).await;
    let room_row = seed_room(&pool, "101", rt.id, 80.0).await;
    let guest = seed_guest(&pool, "Ana", "Lopez").await;

    let today = Utc::now().date_naive();
    let svc = service(&pool);
    let booking = svc
        .create(
            create_payload(
                room_row.id,
                guest.id,
                today + Duration::days(5),
                today + Duration::days(7),
            ),
            1,
        )
        .await
        .unwrap();

    svc.cancel(booking.id, 1).await.unwrap();
    let err = svc.cancel(booking.id, 1).await.unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));

    let err = svc.cancel(9999, 1).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
