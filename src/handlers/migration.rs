use axum::{extract::State, Extension, Json};

use serde_json::json;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::migration::{MigrationOutcome, Migrator};
use crate::store::{FileLocalStore, PgEntryStore};
use crate::AppState;

fn migrator_for(state: &AppState, auth_user: &AuthUser) -> Migrator<FileLocalStore, PgEntryStore> {
    let path = state
        .config
        .legacy_import_dir
        .join(format!("{}.json", auth_user.id));
    Migrator::new(FileLocalStore::new(path), PgEntryStore::new(state.db.clone()))
}

pub async fn preview(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<serde_json::Value>> {
    let mut migrator = migrator_for(&state, &auth_user);
    let preview = migrator.preview();
    let eligible = migrator.is_eligible(&preview);

    Ok(Json(json!({
        "has_local_data": preview.has_local_data,
        "entry_count": preview.entry_count,
        "eligible": eligible,
    })))
}

pub async fn run(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<MigrationOutcome>> {
    let mut migrator = migrator_for(&state, &auth_user);
    let outcome = migrator.run(auth_user.id).await;

    if !outcome.success {
        tracing::warn!(
            user_id = %auth_user.id,
            migrated = outcome.migrated_count,
            errors = outcome.errors.len(),
            "Legacy migration finished with errors"
        );
    }

    Ok(Json(outcome))
}
