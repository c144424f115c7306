use sqlx::PgPool;

use super::types::*;

const SELECT_PERSON: &str =
    "SELECT id, event_id, name, role, email, phone, created_at FROM people";

pub async fn find_for_event(pool: &PgPool, event_id: i64) -> sqlx::Result<Vec<Person>> {
    sqlx::query_as::<_, Person>(&format!(
        "{SELECT_PERSON} WHERE event_id = $1 ORDER BY created_at DESC, id DESC"
    ))
    .bind(event_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, event_id: i64, id: i64) -> sqlx::Result<Option<Person>> {
    sqlx::query_as::<_, Person>(&format!("{SELECT_PERSON} WHERE id = $1 AND event_id = $2"))
        .bind(id)
        .bind(event_id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &PgPool, event_id: i64, input: &PersonInput) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        "INSERT INTO people (event_id, name, role, email, phone) \
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(event_id)
    .bind(&input.name)
    .bind(&input.role)
    .bind(&input.email)
    .bind(&input.phone)
    .fetch_one(pool)
    .await
}

pub async fn update(pool: &PgPool, event_id: i64, id: i64, input: &PersonInput) -> sqlx::Result<bool> {
    let result = sqlx::query(
        "UPDATE people SET name = $1, role = $2, email = $3, phone = $4 \
         WHERE id = $5 AND event_id = $6",
    )
    .bind(&input.name)
    .bind(&input.role)
    .bind(&input.email)
    .bind(&input.phone)
    .bind(id)
    .bind(event_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a person and strip them from timeline and document assignments.
pub async fn delete(pool: &PgPool, event_id: i64, id: i64) -> sqlx::Result<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "UPDATE timeline_items SET assigned_person_ids = array_remove(assigned_person_ids, $1) \
         WHERE event_id = $2",
    )
    .bind(id)
    .bind(event_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "UPDATE documents SET assigned_to = array_remove(assigned_to, $1) WHERE event_id = $2",
    )
    .bind(id)
    .bind(event_id)
    .execute(&mut *tx)
    .await?;

    let result = sqlx::query("DELETE FROM people WHERE id = $1 AND event_id = $2")
        .bind(id)
        .bind(event_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(result.rows_affected() > 0)
}
