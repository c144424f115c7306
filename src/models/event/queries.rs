use sqlx::PgPool;

use super::types::*;

const SELECT_EVENT: &str =
    "SELECT id, name, event_date, location, description, created_at FROM events";

pub async fn find_all(pool: &PgPool) -> sqlx::Result<Vec<Event>> {
    sqlx::query_as::<_, Event>(&format!("{SELECT_EVENT} ORDER BY event_date ASC, id ASC"))
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> sqlx::Result<Option<Event>> {
    sqlx::query_as::<_, Event>(&format!("{SELECT_EVENT} WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &PgPool, input: &EventInput) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        "INSERT INTO events (name, event_date, location, description) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&input.name)
    .bind(input.event_date)
    .bind(&input.location)
    .bind(&input.description)
    .fetch_one(pool)
    .await
}

/// Returns false when no event has this id.
pub async fn update(pool: &PgPool, id: i64, input: &EventInput) -> sqlx::Result<bool> {
    let result = sqlx::query(
        "UPDATE events SET name = $1, event_date = $2, location = $3, description = $4 \
         WHERE id = $5",
    )
    .bind(&input.name)
    .bind(input.event_date)
    .bind(&input.location)
    .bind(&input.description)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
