use sqlx::PgPool;

use super::types::*;

const SELECT_TASK: &str = "SELECT id, event_id, title, description, priority, status, \
                                  assigned_person_id, assigned_vendor_id, duration_minutes, \
                                  created_at \
                           FROM tasks";

pub async fn find_for_event(pool: &PgPool, event_id: i64) -> sqlx::Result<Vec<Task>> {
    sqlx::query_as::<_, Task>(&format!(
        "{SELECT_TASK} WHERE event_id = $1 ORDER BY created_at DESC, id DESC"
    ))
    .bind(event_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, event_id: i64, id: i64) -> sqlx::Result<Option<Task>> {
    sqlx::query_as::<_, Task>(&format!("{SELECT_TASK} WHERE id = $1 AND event_id = $2"))
        .bind(id)
        .bind(event_id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &PgPool, event_id: i64, input: &TaskInput) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        "INSERT INTO tasks (event_id, title, description, priority, status, \
                            assigned_person_id, assigned_vendor_id, duration_minutes) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id",
    )
    .bind(event_id)
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.priority.as_str())
    .bind(&input.status)
    .bind(input.assigned_person_id)
    .bind(input.assigned_vendor_id)
    .bind(input.duration_minutes)
    .fetch_one(pool)
    .await
}

pub async fn update(pool: &PgPool, event_id: i64, id: i64, input: &TaskInput) -> sqlx::Result<bool> {
    let result = sqlx::query(
        "UPDATE tasks SET title = $1, description = $2, priority = $3, status = $4, \
                          assigned_person_id = $5, assigned_vendor_id = $6, duration_minutes = $7 \
         WHERE id = $8 AND event_id = $9",
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.priority.as_str())
    .bind(&input.status)
    .bind(input.assigned_person_id)
    .bind(input.assigned_vendor_id)
    .bind(input.duration_minutes)
    .bind(id)
    .bind(event_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Set a task's status and return the stored row, or `None` if it does not exist.
pub async fn set_status(pool: &PgPool, event_id: i64, id: i64, status: &str) -> sqlx::Result<Option<Task>> {
    sqlx::query_as::<_, Task>(
        "UPDATE tasks SET status = $1 WHERE id = $2 AND event_id = $3 \
         RETURNING id, event_id, title, description, priority, status, \
                   assigned_person_id, assigned_vendor_id, duration_minutes, created_at",
    )
    .bind(status)
    .bind(id)
    .bind(event_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, event_id: i64, id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND event_id = $2")
        .bind(id)
        .bind(event_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
