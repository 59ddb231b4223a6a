use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::practice::{Entry, EntryRecord, Routine, SelectedRoutine};

use super::{ListQuery, Result};

/// Repository for practice entry documents.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Gets an entry by its ID.
    async fn get_entry(&self, id: Uuid) -> Result<Option<Entry>>;

    /// Resolves a list of entry ids against the store.
    ///
    /// Preserves the order of the requested ids, keeps duplicates, and
    /// silently skips ids that do not resolve. Always a fresh store read:
    /// callers rely on this for aggregate computation.
    async fn get_entries_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Entry>>;

    /// Lists entries matching the query, filtered, sorted, and paginated.
    async fn list_entries(&self, query: &ListQuery) -> Result<Vec<Entry>>;

    /// Creates a new entry.
    async fn create_entry(&self, entry: &Entry) -> Result<()>;

    /// Updates an existing entry.
    async fn update_entry(&self, entry: &Entry) -> Result<()>;

    /// Deletes an entry by its ID.
    ///
    /// Referential integrity is not enforced: routines and records keep
    /// their (now dangling) references.
    async fn delete_entry(&self, id: Uuid) -> Result<()>;

    /// Atomically increments the entry's `time_spent` by `minutes` and
    /// bumps `updated_at`, returning the updated entry.
    ///
    /// Implementations must apply the increment under a single store
    /// operation so concurrent calls never lose updates.
    async fn add_time_spent(&self, id: Uuid, minutes: u32) -> Result<Entry>;
}

/// Repository for routine documents.
#[async_trait]
pub trait RoutineRepository: Send + Sync {
    /// Gets a routine by its ID.
    async fn get_routine(&self, id: Uuid) -> Result<Option<Routine>>;

    /// Lists routines matching the query, filtered, sorted, and paginated.
    async fn list_routines(&self, query: &ListQuery) -> Result<Vec<Routine>>;

    /// Creates a new routine.
    async fn create_routine(&self, routine: &Routine) -> Result<()>;

    /// Updates an existing routine.
    async fn update_routine(&self, routine: &Routine) -> Result<()>;

    /// Deletes a routine by its ID.
    async fn delete_routine(&self, id: Uuid) -> Result<()>;
}

/// Repository for the selected-routine singleton.
///
/// The store holds at most one selection. Replacement is a single atomic
/// slot write, not a delete-then-insert pair, so no interleaving of
/// concurrent calls can leave two selections behind.
#[async_trait]
pub trait SelectedRoutineRepository: Send + Sync {
    /// Returns the current selection, if any.
    async fn get_selected(&self) -> Result<Option<SelectedRoutine>>;

    /// Atomically replaces the current selection.
    async fn set_selected(&self, selection: &SelectedRoutine) -> Result<()>;

    /// Clears the selection. Succeeds even when nothing is selected.
    async fn clear_selected(&self) -> Result<()>;
}

/// Repository for the append-only entry record log.
#[async_trait]
pub trait EntryRecordRepository: Send + Sync {
    /// Appends a record to the log.
    async fn append_record(&self, record: &EntryRecord) -> Result<()>;

    /// Returns all records with `date >= since`, oldest first.
    async fn get_records_since(&self, since: DateTime<Utc>) -> Result<Vec<EntryRecord>>;
}
