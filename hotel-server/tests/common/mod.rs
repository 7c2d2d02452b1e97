//! Shared test fixtures: in-memory database and seed data

use chrono::NaiveDate;
use hotel_server::db::MIGRATOR;
use hotel_server::db::models::{
    Guest, GuestCreate, Room, RoomCreate, RoomType, RoomTypeCreate, SeasonalPeriod,
    SeasonalPeriodCreate,
};
use hotel_server::db::repository::{guest, room, room_type, season};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    MIGRATOR.run(&pool).await.expect("migrations");
    pool
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

pub async fn seed_room_type(pool: &SqlitePool, name: &str, factor: f64) -> RoomType {
    room_type::create(
        pool,
        RoomTypeCreate {
            name: name.to_string(),
            description: None,
            type_factor: factor,
        },
    )
    .await
    .expect("room type")
}

pub async fn seed_room(pool: &SqlitePool, number: &str, type_id: i64, base_price: f64) -> Room {
    room::create(
        pool,
        RoomCreate {
            room_number: number.to_string(),
            room_type_id: type_id,
            floor: Some(1),
            base_price,
            capacity: Some(2),
            description: None,
        },
    )
    .await
    .expect("room")
}

pub async fn seed_guest(pool: &SqlitePool, first: &str, last: &str) -> Guest {
    guest::create(
        pool,
        GuestCreate {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: None,
            phone: None,
            document_number: Some(format!("{first}-{last}-001")),
        },
    )
    .await
    .expect("guest")
}

pub async fn seed_season(
    pool: &SqlitePool,
    name: &str,
    start: &str,
    end: &str,
    factor: f64,
    active: bool,
) -> SeasonalPeriod {
    season::create(
        pool,
        SeasonalPeriodCreate {
            name: name.to_string(),
            start_date: date(start),
            end_date: date(end),
            factor,
            is_active: Some(active),
        },
    )
    .await
    .expect("seasonal period")
}
