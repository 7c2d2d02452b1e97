//! Room Repository

use super::{RepoError, RepoResult};
use crate::db::models::{Room, RoomCreate, RoomStatus, RoomUpdate};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, room_number, room_type_id, floor, base_price, capacity, status, description, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Room>> {
    let rooms = sqlx::query_as::<_, Room>(&format!(
        "SELECT {COLUMNS} FROM room ORDER BY room_number"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rooms)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Room>> {
    let room = sqlx::query_as::<_, Room>(&format!("SELECT {COLUMNS} FROM room WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(room)
}

pub async fn find_by_number(pool: &SqlitePool, room_number: &str) -> RepoResult<Option<Room>> {
    let room = sqlx::query_as::<_, Room>(&format!(
        "SELECT {COLUMNS} FROM room WHERE room_number = ? LIMIT 1"
    ))
    .bind(room_number)
    .fetch_optional(pool)
    .await?;
    Ok(room)
}

pub async fn find_by_status(
    ex: impl sqlx::SqliteExecutor<'_>,
    status: RoomStatus,
) -> RepoResult<Vec<Room>> {
    let rooms = sqlx::query_as::<_, Room>(&format!(
        "SELECT {COLUMNS} FROM room WHERE status = ? ORDER BY room_number"
    ))
    .bind(status)
    .fetch_all(ex)
    .await?;
    Ok(rooms)
}

pub async fn create(pool: &SqlitePool, data: RoomCreate) -> RepoResult<Room> {
    if data.base_price < 0.0 {
        return Err(RepoError::Validation(
            "base_price must not be negative".into(),
        ));
    }
    if find_by_number(pool, &data.room_number).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Room '{}' already exists",
            data.room_number
        )));
    }
    let type_exists =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM room_type WHERE id = ?")
            .bind(data.room_type_id)
            .fetch_one(pool)
            .await?;
    if type_exists == 0 {
        return Err(RepoError::NotFound(format!(
            "Room type {} not found",
            data.room_type_id
        )));
    }

    let now = Utc::now();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO room (room_number, room_type_id, floor, base_price, capacity, status, description, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.room_number)
    .bind(data.room_type_id)
    .bind(data.floor)
    .bind(data.base_price)
    .bind(data.capacity.unwrap_or(1))
    .bind(RoomStatus::Available)
    .bind(&data.description)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create room".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: RoomUpdate) -> RepoResult<Room> {
    if let Some(number) = &data.room_number
        && let Some(existing) = find_by_number(pool, number).await?
        && existing.id != id
    {
        return Err(RepoError::Duplicate(format!(
            "Room '{}' already exists",
            number
        )));
    }

    let rows = sqlx::query(
        "UPDATE room SET room_number = COALESCE(?, room_number), room_type_id = COALESCE(?, room_type_id), \
         floor = COALESCE(?, floor), base_price = COALESCE(?, base_price), capacity = COALESCE(?, capacity), \
         status = COALESCE(?, status), description = COALESCE(?, description), updated_at = ? WHERE id = ?",
    )
    .bind(&data.room_number)
    .bind(data.room_type_id)
    .bind(data.floor)
    .bind(data.base_price)
    .bind(data.capacity)
    .bind(data.status)
    .bind(&data.description)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Room {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Room {id} not found")))
}

/// Set room status and stamp the status-change timestamp
pub async fn set_status(
    ex: impl sqlx::SqliteExecutor<'_>,
    id: i64,
    status: RoomStatus,
    now: DateTime<Utc>,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE room SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(ex)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Room {id} not found")));
    }
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let active = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM reservation WHERE room_id = ? AND status IN ('pending', 'confirmed')",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    if active > 0 {
        return Err(RepoError::Validation(format!(
            "Room {id} has {active} active reservation(s)"
        )));
    }

    let rows = sqlx::query("DELETE FROM room WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
