//! Guest Repository

use super::{RepoError, RepoResult};
use crate::db::models::{Guest, GuestCreate, GuestUpdate};
use chrono::Utc;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, first_name, last_name, email, phone, document_number, created_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Guest>> {
    let guests = sqlx::query_as::<_, Guest>(&format!(
        "SELECT {COLUMNS} FROM guest ORDER BY last_name, first_name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(guests)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Guest>> {
    let guest = sqlx::query_as::<_, Guest>(&format!("SELECT {COLUMNS} FROM guest WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(guest)
}

pub async fn find_by_document(pool: &SqlitePool, document: &str) -> RepoResult<Option<Guest>> {
    let guest = sqlx::query_as::<_, Guest>(&format!(
        "SELECT {COLUMNS} FROM guest WHERE document_number = ? LIMIT 1"
    ))
    .bind(document)
    .fetch_optional(pool)
    .await?;
    Ok(guest)
}

pub async fn create(pool: &SqlitePool, data: GuestCreate) -> RepoResult<Guest> {
    if let Some(document) = &data.document_number
        && find_by_document(pool, document).await?.is_some()
    {
        return Err(RepoError::Duplicate(format!(
            "Guest with document '{}' already exists",
            document
        )));
    }

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO guest (first_name, last_name, email, phone, document_number, created_at) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.document_number)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create guest".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: GuestUpdate) -> RepoResult<Guest> {
    if let Some(document) = &data.document_number
        && let Some(existing) = find_by_document(pool, document).await?
        && existing.id != id
    {
        return Err(RepoError::Duplicate(format!(
            "Guest with document '{}' already exists",
            document
        )));
    }

    let rows = sqlx::query(
        "UPDATE guest SET first_name = COALESCE(?, first_name), last_name = COALESCE(?, last_name), \
         email = COALESCE(?, email), phone = COALESCE(?, phone), document_number = COALESCE(?, document_number) \
         WHERE id = ?",
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.document_number)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Guest {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Guest {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let active = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM reservation WHERE guest_id = ? AND status IN ('pending', 'confirmed')",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    if active > 0 {
        return Err(RepoError::Validation(format!(
            "Guest {id} has {active} active reservation(s)"
        )));
    }

    let rows = sqlx::query("DELETE FROM guest WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
