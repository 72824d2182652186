//! The remote data-access facade: the narrow CRUD surface the calendar
//! and migration code is allowed to touch. Nothing in this crate holds a
//! privileged database handle beyond this pool.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::entry::Entry;

#[allow(async_fn_in_trait)]
pub trait RemoteEntryStore {
    async fn get_entry_by_owner_and_date(
        &self,
        owner_id: Uuid,
        date: NaiveDate,
    ) -> anyhow::Result<Option<Entry>>;

    /// Insert one entry for (owner, date). Atomic insert-if-absent:
    /// returns `None` when a row for that date already exists, so a lost
    /// race never surfaces as an error and never overwrites.
    async fn insert_entry(
        &self,
        owner_id: Uuid,
        date: NaiveDate,
        content: &str,
    ) -> anyhow::Result<Option<Entry>>;

    /// All entries for an owner, newest date first.
    async fn list_entries(&self, owner_id: Uuid) -> anyhow::Result<Vec<Entry>>;

    /// Entries for an owner within an optional date range, newest first.
    /// An absent bound is unbounded on that side.
    async fn list_entries_in_range(
        &self,
        owner_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<Entry>>;
}

#[derive(Clone)]
pub struct PgEntryStore {
    pool: PgPool,
}

impl PgEntryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RemoteEntryStore for PgEntryStore {
    async fn get_entry_by_owner_and_date(
        &self,
        owner_id: Uuid,
        date: NaiveDate,
    ) -> anyhow::Result<Option<Entry>> {
        let entry = sqlx::query_as::<_, Entry>(
            "SELECT * FROM entries WHERE user_id = $1 AND entry_date = $2",
        )
        .bind(owner_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn insert_entry(
        &self,
        owner_id: Uuid,
        date: NaiveDate,
        content: &str,
    ) -> anyhow::Result<Option<Entry>> {
        // The unique index on (user_id, entry_date) decides; no row back
        // means someone else already wrote this day.
        let entry = sqlx::query_as::<_, Entry>(
            r#"
            INSERT INTO entries (id, user_id, entry_date, content)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, entry_date) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(date)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn list_entries(&self, owner_id: Uuid) -> anyhow::Result<Vec<Entry>> {
        let entries = sqlx::query_as::<_, Entry>(
            "SELECT * FROM entries WHERE user_id = $1 ORDER BY entry_date DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn list_entries_in_range(
        &self,
        owner_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<Entry>> {
        let entries = sqlx::query_as::<_, Entry>(
            r#"
            SELECT * FROM entries
            WHERE user_id = $1
              AND ($2::date IS NULL OR entry_date >= $2)
              AND ($3::date IS NULL OR entry_date <= $3)
            ORDER BY entry_date DESC
            "#,
        )
        .bind(owner_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
