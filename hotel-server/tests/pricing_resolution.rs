//! Nightly price resolution against a real database

mod common;

use common::{date, seed_guest, seed_room, seed_room_type, seed_season, test_pool};
use hotel_server::PricingResolver;
use hotel_server::db::models::{SeasonalRoomPriceCreate, SeasonalRoomPriceEntry};
use hotel_server::db::repository::{RepoError, season, season_price};
use hotel_server::pricing::to_f64;
use hotel_server::utils::AppError;

#[tokio::test]
async fn base_price_times_type_factor_when_no_season() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.2).await;
    let room = seed_room(&pool, "101", rt.id, 100.0).await;

    let resolver = PricingResolver::new(pool.clone());
    let price = resolver
        .nightly_price(room.id, date("2025-03-15"))
        .await
        .unwrap();
    assert_eq!(to_f64(price), 120.0);
}

#[tokio::test]
async fn seasonal_factor_multiplies_base_and_type() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.2).await;
    let room = seed_room(&pool, "101", rt.id, 100.0).await;
    seed_season(&pool, "High season", "2025-07-01", "2025-08-31", 1.5, true).await;

    let resolver = PricingResolver::new(pool.clone());
    let price = resolver
        .nightly_price(room.id, date("2025-07-10"))
        .await
        .unwrap();
    assert_eq!(to_f64(price), 180.0);

    // outside the period the base price applies again
    let price = resolver
        .nightly_price(room.id, date("2025-09-01"))
        .await
        .unwrap();
    assert_eq!(to_f64(price), 120.0);
}

#[tokio::test]
async fn period_bounds_are_inclusive() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Single", 1.0).await;
    let room = seed_room(&pool, "101", rt.id, 100.0).await;
    seed_season(&pool, "High season", "2025-07-01", "2025-08-31", 1.5, true).await;

    let resolver = PricingResolver::new(pool.clone());
    for day in ["2025-07-01", "2025-08-31"] {
        let price = resolver.nightly_price(room.id, date(day)).await.unwrap();
        assert_eq!(to_f64(price), 150.0, "{day} should be in season");
    }
    let price = resolver
        .nightly_price(room.id, date("2025-06-30"))
        .await
        .unwrap();
    assert_eq!(to_f64(price), 100.0);
}

#[tokio::test]
async fn inactive_period_is_ignored() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.2).await;
    let room = seed_room(&pool, "101", rt.id, 100.0).await;
    seed_season(&pool, "Old season", "2025-07-01", "2025-08-31", 2.0, false).await;

    let resolver = PricingResolver::new(pool.clone());
    let price = resolver
        .nightly_price(room.id, date("2025-07-10"))
        .await
        .unwrap();
    assert_eq!(to_f64(price), 120.0);
}

#[tokio::test]
async fn override_bypasses_both_factors() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Suite", 1.2).await;
    let room = seed_room(&pool, "301", rt.id, 100.0).await;
    let period = seed_season(&pool, "High season", "2025-07-01", "2025-08-31", 1.5, true).await;

    season_price::create(
        &pool,
        SeasonalRoomPriceCreate {
            seasonal_period_id: period.id,
            room_id: room.id,
            override_price: 150.0,
        },
    )
    .await
    .unwrap();

    let resolver = PricingResolver::new(pool.clone());
    let price = resolver
        .nightly_price(room.id, date("2025-07-10"))
        .await
        .unwrap();
    assert_eq!(to_f64(price), 150.0);
}

#[tokio::test]
async fn quote_sums_nights_across_a_season_boundary() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.0).await;
    let room = seed_room(&pool, "101", rt.id, 100.0).await;
    // season covers only the first two nights of the stay
    seed_season(&pool, "High season", "2025-06-01", "2025-07-01", 1.5, true).await;

    let resolver = PricingResolver::new(pool.clone());
    let quote = resolver
        .quote_stay(room.id, date("2025-06-30"), date("2025-07-04"))
        .await
        .unwrap();

    assert_eq!(quote.nights, 4);
    assert_eq!(quote.per_night.len(), 4);
    // 150 + 150 + 100 + 100
    assert_eq!(quote.total_price, 500.0);
    assert_eq!(quote.price_per_night, 150.0);
    assert_eq!(quote.per_night[2].price, 100.0);
}

#[tokio::test]
async fn quote_rejects_inverted_dates() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.0).await;
    let room = seed_room(&pool, "101", rt.id, 100.0).await;
    seed_guest(&pool, "Ana", "Lopez").await;

    let resolver = PricingResolver::new(pool.clone());
    let err = resolver
        .quote_stay(room.id, date("2025-07-04"), date("2025-07-04"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn duplicate_override_for_same_pair_is_rejected() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.0).await;
    let room = seed_room(&pool, "101", rt.id, 100.0).await;
    let period = seed_season(&pool, "High season", "2025-07-01", "2025-08-31", 1.5, true).await;

    let payload = SeasonalRoomPriceCreate {
        seasonal_period_id: period.id,
        room_id: room.id,
        override_price: 150.0,
    };
    season_price::create(&pool, payload.clone()).await.unwrap();
    let err = season_price::create(&pool, payload).await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn bulk_override_creation_is_all_or_nothing() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.0).await;
    let room = seed_room(&pool, "101", rt.id, 100.0).await;
    let period = seed_season(&pool, "High season", "2025-07-01", "2025-08-31", 1.5, true).await;

    // second entry references a room that does not exist
    let err = season_price::create_many(
        &pool,
        period.id,
        vec![
            SeasonalRoomPriceEntry {
                room_id: room.id,
                override_price: 150.0,
            },
            SeasonalRoomPriceEntry {
                room_id: room.id + 999,
                override_price: 90.0,
            },
        ],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));

    let remaining = season_price::find_by_period(&pool, period.id).await.unwrap();
    assert!(remaining.is_empty(), "no partial writes");
}

#[tokio::test]
async fn legacy_overlapping_active_periods_resolve_to_lowest_id() {
    let pool = test_pool().await;
    let rt = seed_room_type(&pool, "Double", 1.0).await;
    let room = seed_room(&pool, "101", rt.id, 100.0).await;
    seed_season(&pool, "High season", "2025-07-01", "2025-08-31", 1.5, true).await;

    // legacy rows predate the overlap guard; insert one directly
    sqlx::query(
        "INSERT INTO seasonal_period (name, start_date, end_date, factor, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, 1, ?, ?)",
    )
    .bind("Legacy clash")
    .bind(date("2025-07-15"))
    .bind(date("2025-09-15"))
    .bind(2.0_f64)
    .bind(chrono::Utc::now())
    .bind(chrono::Utc::now())
    .execute(&pool)
    .await
    .unwrap();

    let resolver = PricingResolver::new(pool.clone());
    let price = resolver
        .nightly_price(room.id, date("2025-07-20"))
        .await
        .unwrap();
    assert_eq!(to_f64(price), 150.0, "earliest period's factor wins");
}

#[tokio::test]
async fn overlapping_active_periods_are_rejected() {
    let pool = test_pool().await;
    seed_season(&pool, "High season", "2025-07-01", "2025-08-31", 1.5, true).await;

    let err = season::create(
        &pool,
        hotel_server::db::models::SeasonalPeriodCreate {
            name: "Clashing".to_string(),
            start_date: date("2025-08-15"),
            end_date: date("2025-09-15"),
            factor: 1.3,
            is_active: Some(true),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));

    // an inactive period may overlap freely
    season::create(
        &pool,
        hotel_server::db::models::SeasonalPeriodCreate {
            name: "Draft".to_string(),
            start_date: date("2025-08-15"),
            end_date: date("2025-09-15"),
            factor: 1.3,
            is_active: Some(false),
        },
    )
    .await
    .unwrap();
}
