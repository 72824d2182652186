use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::auth::middleware::AuthUser;
use crate::calendar::dates::today_for_offset_minutes;
use crate::calendar::{build_multi_week_view, build_week_view, StreakDays};
use crate::error::{AppError, AppResult};
use crate::store::{PgEntryStore, RemoteEntryStore};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub week_start: Option<NaiveDate>,
    /// Comma-separated weekday indices, 0 = Sunday. Default Mon-Fri.
    pub streak_days: Option<String>,
    /// Caller's UTC offset in minutes east, so "today" is their wall
    /// clock rather than the server's.
    pub tz_offset_minutes: Option<i32>,
}

fn parse_streak_days(raw: Option<&str>) -> AppResult<StreakDays> {
    match raw {
        None => Ok(StreakDays::default()),
        Some(csv) => StreakDays::from_csv(csv).ok_or_else(|| {
            AppError::Validation("streak_days must be weekday indices 0-6".into())
        }),
    }
}

pub async fn week_view(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let streak_days = parse_streak_days(query.streak_days.as_deref())?;

    let store = PgEntryStore::new(state.db.clone());
    let entries = store.list_entries(auth_user.id).await?;

    let today = today_for_offset_minutes(query.tz_offset_minutes);
    let view = build_week_view(&entries, streak_days, query.week_start, today);
    Ok(Json(serde_json::to_value(&view).map_err(anyhow::Error::from)?))
}

pub async fn multi_week_view(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let streak_days = parse_streak_days(query.streak_days.as_deref())?;

    let store = PgEntryStore::new(state.db.clone());
    let entries = store.list_entries(auth_user.id).await?;

    let today = today_for_offset_minutes(query.tz_offset_minutes);
    let weeks = build_multi_week_view(&entries, streak_days, today);
    Ok(Json(serde_json::to_value(&weeks).map_err(anyhow::Error::from)?))
}
