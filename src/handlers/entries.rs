use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::calendar::dates::{format_for_display, today_for_offset_minutes};
use crate::error::{AppError, AppResult};
use crate::models::entry::{CreateEntryRequest, Entry, EntryQuery};
use crate::store::{PgEntryStore, RemoteEntryStore};
use crate::AppState;

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<EntryQuery>,
) -> AppResult<Json<Vec<Entry>>> {
    let store = PgEntryStore::new(state.db.clone());
    let entries = store
        .list_entries_in_range(auth_user.id, query.start_date, query.end_date)
        .await?;

    Ok(Json(entries))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateEntryRequest>,
) -> AppResult<Json<Entry>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let entry_date = body
        .entry_date
        .unwrap_or_else(|| today_for_offset_minutes(body.tz_offset_minutes));

    // Insert-if-absent; the unique index arbitrates concurrent posts for
    // the same day, so no pre-check is needed.
    let store = PgEntryStore::new(state.db.clone());
    let entry = store
        .insert_entry(auth_user.id, entry_date, &body.content)
        .await?
        .ok_or_else(|| {
            AppError::Conflict(format!(
                "An entry already exists for {}",
                format_for_display(entry_date)
            ))
        })?;

    Ok(Json(entry))
}

pub async fn get_entry_by_date(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(date): Path<chrono::NaiveDate>,
) -> AppResult<Json<Entry>> {
    let store = PgEntryStore::new(state.db.clone());
    let entry = store
        .get_entry_by_owner_and_date(auth_user.id, date)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No entry for {date}")))?;

    Ok(Json(entry))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    // Idempotent: deleting an already-gone entry still returns 200.
    sqlx::query("DELETE FROM entries WHERE id = $1 AND user_id = $2")
        .bind(entry_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    Ok(Json(serde_json::json!({ "deleted": true })))
}
