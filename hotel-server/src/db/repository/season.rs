//! Seasonal Period Repository
//!
//! Enforces the no-overlap invariant among active periods at write time.

use super::{RepoError, RepoResult};
use crate::db::models::{SeasonalPeriod, SeasonalPeriodCreate, SeasonalPeriodUpdate};
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, start_date, end_date, factor, is_active, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<SeasonalPeriod>> {
    let periods = sqlx::query_as::<_, SeasonalPeriod>(&format!(
        "SELECT {COLUMNS} FROM seasonal_period ORDER BY start_date"
    ))
    .fetch_all(pool)
    .await?;
    Ok(periods)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<SeasonalPeriod>> {
    let period = sqlx::query_as::<_, SeasonalPeriod>(&format!(
        "SELECT {COLUMNS} FROM seasonal_period WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(period)
}

/// Active periods whose inclusive [start, end] range contains `date`,
/// ordered by id so callers that must pick one do so deterministically.
///
/// The write-time invariant guarantees at most one row; legacy data that
/// slipped past it (deactivated-then-reactivated ranges) may yield more.
pub async fn find_active_containing(
    pool: &SqlitePool,
    date: NaiveDate,
) -> RepoResult<Vec<SeasonalPeriod>> {
    let periods = sqlx::query_as::<_, SeasonalPeriod>(&format!(
        "SELECT {COLUMNS} FROM seasonal_period WHERE is_active = 1 AND start_date <= ? AND end_date >= ? ORDER BY id"
    ))
    .bind(date)
    .bind(date)
    .fetch_all(pool)
    .await?;
    Ok(periods)
}

/// Count active periods overlapping [start, end], excluding one id
async fn count_active_overlapping(
    pool: &SqlitePool,
    start: NaiveDate,
    end: NaiveDate,
    exclude_id: Option<i64>,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM seasonal_period WHERE is_active = 1 AND start_date <= ? AND end_date >= ? AND id <> COALESCE(?, -1)",
    )
    .bind(end)
    .bind(start)
    .bind(exclude_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

fn validate_range(start: NaiveDate, end: NaiveDate, factor: f64) -> RepoResult<()> {
    if end < start {
        return Err(RepoError::Validation(
            "end_date must not precede start_date".into(),
        ));
    }
    if factor <= 0.0 {
        return Err(RepoError::Validation("factor must be positive".into()));
    }
    Ok(())
}

pub async fn create(pool: &SqlitePool, data: SeasonalPeriodCreate) -> RepoResult<SeasonalPeriod> {
    validate_range(data.start_date, data.end_date, data.factor)?;

    let is_active = data.is_active.unwrap_or(true);
    if is_active
        && count_active_overlapping(pool, data.start_date, data.end_date, None).await? > 0
    {
        return Err(RepoError::Duplicate(format!(
            "An active seasonal period already overlaps {} .. {}",
            data.start_date, data.end_date
        )));
    }

    let now = Utc::now();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO seasonal_period (name, start_date, end_date, factor, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(data.factor)
    .bind(is_active)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create seasonal period".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: SeasonalPeriodUpdate,
) -> RepoResult<SeasonalPeriod> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Seasonal period {id} not found")))?;

    let start = data.start_date.unwrap_or(existing.start_date);
    let end = data.end_date.unwrap_or(existing.end_date);
    let factor = data.factor.unwrap_or(existing.factor);
    let is_active = data.is_active.unwrap_or(existing.is_active);
    validate_range(start, end, factor)?;

    if is_active && count_active_overlapping(pool, start, end, Some(id)).await? > 0 {
        return Err(RepoError::Duplicate(format!(
            "An active seasonal period already overlaps {} .. {}",
            start, end
        )));
    }

    sqlx::query(
        "UPDATE seasonal_period SET name = COALESCE(?, name), start_date = ?, end_date = ?, factor = ?, is_active = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&data.name)
    .bind(start)
    .bind(end)
    .bind(factor)
    .bind(is_active)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Seasonal period {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM seasonal_period WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
