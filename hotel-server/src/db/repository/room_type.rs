//! Room Type Repository

use super::{RepoError, RepoResult};
use crate::db::models::{RoomType, RoomTypeCreate, RoomTypeUpdate};
use chrono::Utc;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, description, type_factor, created_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<RoomType>> {
    let types = sqlx::query_as::<_, RoomType>(&format!(
        "SELECT {COLUMNS} FROM room_type ORDER BY name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(types)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<RoomType>> {
    let room_type = sqlx::query_as::<_, RoomType>(&format!(
        "SELECT {COLUMNS} FROM room_type WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(room_type)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<RoomType>> {
    let room_type = sqlx::query_as::<_, RoomType>(&format!(
        "SELECT {COLUMNS} FROM room_type WHERE name = ? LIMIT 1"
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(room_type)
}

pub async fn create(pool: &SqlitePool, data: RoomTypeCreate) -> RepoResult<RoomType> {
    if data.type_factor <= 0.0 {
        return Err(RepoError::Validation(
            "type_factor must be positive".into(),
        ));
    }
    if find_by_name(pool, &data.name).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Room type '{}' already exists",
            data.name
        )));
    }

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO room_type (name, description, type_factor, created_at) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.type_factor)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create room type".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: RoomTypeUpdate) -> RepoResult<RoomType> {
    if let Some(factor) = data.type_factor
        && factor <= 0.0
    {
        return Err(RepoError::Validation(
            "type_factor must be positive".into(),
        ));
    }
    if let Some(name) = &data.name
        && let Some(existing) = find_by_name(pool, name).await?
        && existing.id != id
    {
        return Err(RepoError::Duplicate(format!(
            "Room type '{}' already exists",
            name
        )));
    }

    let rows = sqlx::query(
        "UPDATE room_type SET name = COALESCE(?, name), description = COALESCE(?, description), type_factor = COALESCE(?, type_factor) WHERE id = ?",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.type_factor)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Room type {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Room type {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let in_use = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM room WHERE room_type_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if in_use > 0 {
        return Err(RepoError::Validation(format!(
            "Room type {id} is referenced by {in_use} room(s)"
        )));
    }

    let rows = sqlx::query("DELETE FROM room_type WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
