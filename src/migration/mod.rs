//! One-time transfer of legacy local entries into the remote store.
//!
//! The run is sequential by design: each step is a check-then-insert pair
//! against (owner, date), and with a single writer per user that ordering
//! is what keeps the one-entry-per-day invariant. The schema's unique
//! constraint backstops it should a second writer ever appear.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::store::local::{parse_legacy_collection, LocalEntryStore};
use crate::store::remote::RemoteEntryStore;

/// Result of one migration run. Partial success is representable:
/// `migrated_count` can be positive while `success` is false.
#[derive(Debug, Serialize)]
pub struct MigrationOutcome {
    pub success: bool,
    pub migrated_count: usize,
    pub errors: Vec<String>,
}

impl MigrationOutcome {
    fn nothing_to_migrate() -> Self {
        Self {
            success: true,
            migrated_count: 0,
            errors: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MigrationPreview {
    pub has_local_data: bool,
    pub entry_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MigrationPhase {
    NotOffered,
    Offered,
    Running,
    CompletedSuccess,
    CompletedWithErrors,
}

/// Drives the local-to-remote transfer for one user. Plain stateful
/// object; any reactive wrapping belongs to the caller.
pub struct Migrator<L, R> {
    local: L,
    remote: R,
    phase: MigrationPhase,
}

impl<L: LocalEntryStore, R: RemoteEntryStore> Migrator<L, R> {
    pub fn new(local: L, remote: R) -> Self {
        Self {
            local,
            remote,
            phase: MigrationPhase::NotOffered,
        }
    }

    pub fn phase(&self) -> MigrationPhase {
        self.phase
    }

    /// What a run would pick up, without touching the remote store.
    /// An unparsable collection previews as no data.
    pub fn preview(&self) -> MigrationPreview {
        let count = self
            .local
            .read()
            .and_then(|raw| parse_legacy_collection(&raw).ok())
            .map(|entries| entries.len())
            .unwrap_or(0);
        MigrationPreview {
            has_local_data: count > 0,
            entry_count: count,
        }
    }

    /// True while legacy data is present and no fully successful run has
    /// happened. A successful run clears the local store, so this can
    /// never flip back to true afterwards. Takes the preview so callers
    /// wanting both pay for one read.
    pub fn is_eligible(&mut self, preview: &MigrationPreview) -> bool {
        if self.phase == MigrationPhase::CompletedSuccess {
            return false;
        }
        if preview.has_local_data && self.phase == MigrationPhase::NotOffered {
            self.phase = MigrationPhase::Offered;
        }
        preview.has_local_data
    }

    /// Migrate every legacy entry for `owner_id`. Never errors past this
    /// boundary: per-entry failures are collected and the batch continues.
    /// Running twice is safe; already-present dates are skipped silently.
    pub async fn run(&mut self, owner_id: Uuid) -> MigrationOutcome {
        self.phase = MigrationPhase::Running;
        let outcome = self.run_batch(owner_id).await;
        self.phase = if outcome.success {
            MigrationPhase::CompletedSuccess
        } else {
            MigrationPhase::CompletedWithErrors
        };
        outcome
    }

    async fn run_batch(&mut self, owner_id: Uuid) -> MigrationOutcome {
        let Some(raw) = self.local.read() else {
            return MigrationOutcome::nothing_to_migrate();
        };
        let legacy = match parse_legacy_collection(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                // Unreadable collection is treated as nothing to migrate.
                tracing::warn!(error = %e, "Legacy collection unparsable, skipping migration");
                return MigrationOutcome::nothing_to_migrate();
            }
        };

        let mut migrated_count = 0usize;
        let mut errors = Vec::new();

        for item in &legacy {
            let Some(date) = item.date.normalize() else {
                errors.push(format!("legacy entry {}: unreadable date", item.id));
                continue;
            };
            match self.migrate_one(owner_id, date, &item.text).await {
                Ok(true) => migrated_count += 1,
                Ok(false) => {} // already remote, skip silently
                Err(e) => errors.push(format!("{date}: {e:#}")),
            }
        }

        let success = errors.is_empty();

        // Clear only after a clean run so failed entries keep their source
        // records available for a retry.
        if success && !legacy.is_empty() {
            if let Err(e) = self.local.clear() {
                tracing::warn!(error = %e, "Failed to clear legacy collection after migration");
            }
        }

        tracing::info!(
            owner_id = %owner_id,
            migrated = migrated_count,
            failed = errors.len(),
            "Legacy migration finished"
        );

        MigrationOutcome {
            success,
            migrated_count,
            errors,
        }
    }

    /// Returns true when a new row was written, false on a dedup skip.
    async fn migrate_one(
        &self,
        owner_id: Uuid,
        date: NaiveDate,
        text: &str,
    ) -> anyhow::Result<bool> {
        if self
            .remote
            .get_entry_by_owner_and_date(owner_id, date)
            .await?
            .is_some()
        {
            return Ok(false);
        }
        // Insert-if-absent: a row that appeared after the check above is a
        // skip like any other duplicate, not a failure.
        let inserted = self.remote.insert_entry(owner_id, date, text).await?;
        Ok(inserted.is_some())
    }
}
