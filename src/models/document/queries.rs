use sqlx::PgPool;

use super::types::*;

const SELECT_DOCUMENT: &str = "SELECT id, event_id, name, category, mime_type, file_type, \
                                      file_size, source, assigned_to, file_url, file_path, \
                                      google_drive_url, vendor_id, uploaded_by, created_at \
                               FROM documents";

/// All documents of an event, newest first.
pub async fn find_for_event(pool: &PgPool, event_id: i64) -> sqlx::Result<Vec<Document>> {
    sqlx::query_as::<_, Document>(&format!(
        "{SELECT_DOCUMENT} WHERE event_id = $1 ORDER BY created_at DESC, id DESC"
    ))
    .bind(event_id)
    .fetch_all(pool)
    .await
}

/// Documents attached to one vendor.
pub async fn find_for_vendor(pool: &PgPool, event_id: i64, vendor_id: i64) -> sqlx::Result<Vec<Document>> {
    sqlx::query_as::<_, Document>(&format!(
        "{SELECT_DOCUMENT} WHERE event_id = $1 AND vendor_id = $2 ORDER BY created_at DESC, id DESC"
    ))
    .bind(event_id)
    .bind(vendor_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, event_id: i64, id: i64) -> sqlx::Result<Option<Document>> {
    sqlx::query_as::<_, Document>(&format!("{SELECT_DOCUMENT} WHERE id = $1 AND event_id = $2"))
        .bind(id)
        .bind(event_id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    event_id: i64,
    input: &DocumentInput,
    uploaded_by: &str,
) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        "INSERT INTO documents (event_id, name, category, mime_type, file_type, file_size, source, \
                                assigned_to, file_url, file_path, google_drive_url, vendor_id, \
                                uploaded_by) \
         VALUES ($1, $2, $3, $4, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING id",
    )
    .bind(event_id)
    .bind(&input.name)
    .bind(&input.category)
    .bind(&input.mime_type)
    .bind(input.file_size)
    .bind(&input.source)
    .bind(&input.assigned_to)
    .bind(&input.file_url)
    .bind(&input.file_path)
    .bind(&input.google_drive_url)
    .bind(input.vendor_id)
    .bind(uploaded_by)
    .fetch_one(pool)
    .await
}

/// Replace the set of people a document is shared with.
pub async fn set_assignees(pool: &PgPool, event_id: i64, id: i64, person_ids: &[i64]) -> sqlx::Result<bool> {
    let result = sqlx::query("UPDATE documents SET assigned_to = $1 WHERE id = $2 AND event_id = $3")
        .bind(person_ids)
        .bind(id)
        .bind(event_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &PgPool, event_id: i64, id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM documents WHERE id = $1 AND event_id = $2")
        .bind(id)
        .bind(event_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
