use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// One journal entry for one calendar day. `entry_date` is a day bucket in
/// the user's local timezone; at most one row exists per (user, date).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entry_date: NaiveDate,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntryRequest {
    /// Defaults to today on the caller's wall clock when omitted.
    pub entry_date: Option<NaiveDate>,

    /// Caller's UTC offset in minutes east, used only when `entry_date`
    /// is omitted.
    pub tz_offset_minutes: Option<i32>,

    #[validate(length(min = 1, max = 50000, message = "Content must be 1-50000 characters"))]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct EntryQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
