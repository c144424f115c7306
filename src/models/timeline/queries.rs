use sqlx::PgPool;

use super::types::*;
use crate::planning::reorder::ScheduleChange;

const SELECT_ITEM: &str = "SELECT id, event_id, title, description, time, duration, category, \
                                  priority, status, assigned_person_ids, assigned_vendor_ids, \
                                  assigned_role, notes, position \
                           FROM timeline_items";

const RETURNING_ITEM: &str = "RETURNING id, event_id, title, description, time, duration, \
                                        category, priority, status, assigned_person_ids, \
                                        assigned_vendor_ids, assigned_role, notes, position";

/// All items of an event in running order.
pub async fn find_for_event(pool: &PgPool, event_id: i64) -> sqlx::Result<Vec<TimelineItem>> {
    sqlx::query_as::<_, TimelineItem>(&format!(
        "{SELECT_ITEM} WHERE event_id = $1 ORDER BY position ASC, time ASC, id ASC"
    ))
    .bind(event_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, event_id: i64, id: i64) -> sqlx::Result<Option<TimelineItem>> {
    sqlx::query_as::<_, TimelineItem>(&format!("{SELECT_ITEM} WHERE id = $1 AND event_id = $2"))
        .bind(id)
        .bind(event_id)
        .fetch_optional(pool)
        .await
}

/// Insert an item at the slot its start time sorts into, shifting later items down.
pub async fn create(pool: &PgPool, event_id: i64, input: &TimelineItemInput) -> sqlx::Result<i64> {
    let time = input.time.to_string();
    let mut tx = pool.begin().await?;

    let position: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM timeline_items WHERE event_id = $1 AND substr(time, 1, 5) <= $2",
    )
    .bind(event_id)
    .bind(&time)
    .fetch_one(&mut *tx)
    .await?;
    let position = i32::try_from(position).unwrap_or(i32::MAX);

    sqlx::query("UPDATE timeline_items SET position = position + 1 WHERE event_id = $1 AND position >= $2")
        .bind(event_id)
        .bind(position)
        .execute(&mut *tx)
        .await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO timeline_items (event_id, title, description, time, duration, category, \
                                     priority, status, assigned_person_ids, assigned_vendor_ids, \
                                     assigned_role, notes, position) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING id",
    )
    .bind(event_id)
    .bind(&input.title)
    .bind(&input.description)
    .bind(&time)
    .bind(input.duration)
    .bind(&input.category)
    .bind(input.priority.as_str())
    .bind(&input.status)
    .bind(&input.assigned_person_ids)
    .bind(&input.assigned_vendor_ids)
    .bind(&input.assigned_role)
    .bind(&input.notes)
    .bind(position)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(id)
}

pub async fn update(pool: &PgPool, event_id: i64, id: i64, input: &TimelineItemInput) -> sqlx::Result<bool> {
    let result = sqlx::query(
        "UPDATE timeline_items SET title = $1, description = $2, time = $3, duration = $4, \
                                   category = $5, priority = $6, status = $7, \
                                   assigned_person_ids = $8, assigned_vendor_ids = $9, \
                                   assigned_role = $10, notes = $11 \
         WHERE id = $12 AND event_id = $13",
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.time.to_string())
    .bind(input.duration)
    .bind(&input.category)
    .bind(input.priority.as_str())
    .bind(&input.status)
    .bind(&input.assigned_person_ids)
    .bind(&input.assigned_vendor_ids)
    .bind(&input.assigned_role)
    .bind(&input.notes)
    .bind(id)
    .bind(event_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Persist the start times and positions produced by a reorder, all or nothing.
/// Returns the updated rows; `RowNotFound` if any item is missing from the event.
pub async fn apply_schedule(
    pool: &PgPool,
    event_id: i64,
    changes: &[ScheduleChange],
) -> sqlx::Result<Vec<TimelineItem>> {
    let mut tx = pool.begin().await?;
    let mut updated = Vec::with_capacity(changes.len());

    for change in changes {
        let item = sqlx::query_as::<_, TimelineItem>(&format!(
            "UPDATE timeline_items SET time = $1, position = $2 \
             WHERE id = $3 AND event_id = $4 {RETURNING_ITEM}"
        ))
        .bind(&change.time)
        .bind(change.position)
        .bind(change.id)
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
        updated.push(item);
    }

    tx.commit().await?;
    Ok(updated)
}

pub async fn delete(pool: &PgPool, event_id: i64, id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM timeline_items WHERE id = $1 AND event_id = $2")
        .bind(id)
        .bind(event_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
