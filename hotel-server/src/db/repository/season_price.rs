//! Seasonal Room Price Override Repository
//!
//! One fixed price per (seasonal period, room) pair.

use super::{RepoError, RepoResult};
use crate::db::models::{SeasonalRoomPrice, SeasonalRoomPriceCreate, SeasonalRoomPriceEntry};
use chrono::Utc;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, seasonal_period_id, room_id, override_price, created_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<SeasonalRoomPrice>> {
    let prices = sqlx::query_as::<_, SeasonalRoomPrice>(&format!(
        "SELECT {COLUMNS} FROM seasonal_room_price ORDER BY seasonal_period_id, room_id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(prices)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<SeasonalRoomPrice>> {
    let price = sqlx::query_as::<_, SeasonalRoomPrice>(&format!(
        "SELECT {COLUMNS} FROM seasonal_room_price WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(price)
}

pub async fn find_by_period(
    pool: &SqlitePool,
    period_id: i64,
) -> RepoResult<Vec<SeasonalRoomPrice>> {
    let prices = sqlx::query_as::<_, SeasonalRoomPrice>(&format!(
        "SELECT {COLUMNS} FROM seasonal_room_price WHERE seasonal_period_id = ? ORDER BY room_id"
    ))
    .bind(period_id)
    .fetch_all(pool)
    .await?;
    Ok(prices)
}

/// The override for a (period, room) pair, if any
pub async fn find_override(
    pool: &SqlitePool,
    period_id: i64,
    room_id: i64,
) -> RepoResult<Option<SeasonalRoomPrice>> {
    let price = sqlx::query_as::<_, SeasonalRoomPrice>(&format!(
        "SELECT {COLUMNS} FROM seasonal_room_price WHERE seasonal_period_id = ? AND room_id = ? LIMIT 1"
    ))
    .bind(period_id)
    .bind(room_id)
    .fetch_optional(pool)
    .await?;
    Ok(price)
}

async fn references_exist(pool: &SqlitePool, period_id: i64, room_id: i64) -> RepoResult<()> {
    let period = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM seasonal_period WHERE id = ?")
        .bind(period_id)
        .fetch_one(pool)
        .await?;
    if period == 0 {
        return Err(RepoError::NotFound(format!(
            "Seasonal period {period_id} not found"
        )));
    }
    let room = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM room WHERE id = ?")
        .bind(room_id)
        .fetch_one(pool)
        .await?;
    if room == 0 {
        return Err(RepoError::NotFound(format!("Room {room_id} not found")));
    }
    Ok(())
}

pub async fn create(
    pool: &SqlitePool,
    data: SeasonalRoomPriceCreate,
) -> RepoResult<SeasonalRoomPrice> {
    if data.override_price <= 0.0 {
        return Err(RepoError::Validation(
            "override_price must be positive".into(),
        ));
    }
    references_exist(pool, data.seasonal_period_id, data.room_id).await?;
    if find_override(pool, data.seasonal_period_id, data.room_id)
        .await?
        .is_some()
    {
        return Err(RepoError::Duplicate(format!(
            "A price override already exists for room {} in period {}",
            data.room_id, data.seasonal_period_id
        )));
    }

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO seasonal_room_price (seasonal_period_id, room_id, override_price, created_at) \
         VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(data.seasonal_period_id)
    .bind(data.room_id)
    .bind(data.override_price)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create price override".into()))
}

/// Bulk-create overrides for one period; all-or-nothing
pub async fn create_many(
    pool: &SqlitePool,
    period_id: i64,
    entries: Vec<SeasonalRoomPriceEntry>,
) -> RepoResult<Vec<SeasonalRoomPrice>> {
    let mut seen = std::collections::HashSet::new();
    for entry in &entries {
        if !seen.insert(entry.room_id) {
            return Err(RepoError::Validation(format!(
                "Duplicate room {} in bulk override request",
                entry.room_id
            )));
        }
        if entry.override_price <= 0.0 {
            return Err(RepoError::Validation(
                "override_price must be positive".into(),
            ));
        }
        references_exist(pool, period_id, entry.room_id).await?;
        if find_override(pool, period_id, entry.room_id).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "A price override already exists for room {} in period {}",
                entry.room_id, period_id
            )));
        }
    }

    let now = Utc::now();
    let mut tx = pool.begin().await?;
    let mut ids = Vec::with_capacity(entries.len());
    for entry in &entries {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO seasonal_room_price (seasonal_period_id, room_id, override_price, created_at) \
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(period_id)
        .bind(entry.room_id)
        .bind(entry.override_price)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
        ids.push(id);
    }
    tx.commit().await?;

    let mut created = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(price) = find_by_id(pool, id).await? {
            created.push(price);
        }
    }
    Ok(created)
}

pub async fn update_price(
    pool: &SqlitePool,
    id: i64,
    override_price: f64,
) -> RepoResult<SeasonalRoomPrice> {
    if override_price <= 0.0 {
        return Err(RepoError::Validation(
            "override_price must be positive".into(),
        ));
    }
    let rows = sqlx::query("UPDATE seasonal_room_price SET override_price = ? WHERE id = ?")
        .bind(override_price)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Price override {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Price override {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM seasonal_room_price WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn delete_by_period(pool: &SqlitePool, period_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM seasonal_room_price WHERE seasonal_period_id = ?")
        .bind(period_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}
