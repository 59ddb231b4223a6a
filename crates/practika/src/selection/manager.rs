//! The selected-routine singleton and the time-recording workflow.
//!
//! At most one routine is active at a time. Selection is replaced with a
//! single atomic slot write in the store, so no sequence of concurrent
//! select and deselect calls can leave two selections behind.
//!
//! Recording time is the one multi-step write in the system: it bumps the
//! entry's running total, appends an audit record, recomputes the routine
//! aggregate from a fresh store read, and invalidates every cache key the
//! write staled.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use practika_core::cache::{
    deserialize_value, entry_key, routine_key, selected_routine_key, serialize_value, Cache,
};
use practika_core::practice::{
    total_time_spent, Entry, EntryRecord, Routine, RoutineView, SelectedRoutine,
    SelectedRoutineView,
};
use practika_core::storage::{
    EntryRecordRepository, EntryRepository, RepositoryError, RoutineRepository,
    SelectedRoutineRepository,
};

/// Errors raised by selection and time-recording operations.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// No routine is currently selected.
    #[error("No routine is currently selected")]
    NoSelection,

    /// The routine id passed to select does not resolve.
    #[error("Routine not found: {0}")]
    RoutineNotFound(Uuid),

    /// The entry is not a member of the selected routine.
    #[error("Entry not found in selected routine: {0}")]
    EntryNotInRoutine(Uuid),

    /// Underlying store failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Outcome of a time-recording call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeRecorded {
    /// Zero minutes requested; nothing was written.
    NoTime,
    /// Time was recorded against the entry.
    Recorded {
        entry: Entry,
        /// Routine-level total recomputed from a fresh store read.
        total_time_spent: u32,
        record: EntryRecord,
    },
}

/// Coordinates the selected-routine singleton across the repositories and
/// the cache.
#[derive(Clone)]
pub struct SelectedRoutineManager {
    entries: Arc<dyn EntryRepository>,
    routines: Arc<dyn RoutineRepository>,
    selection: Arc<dyn SelectedRoutineRepository>,
    records: Arc<dyn EntryRecordRepository>,
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl SelectedRoutineManager {
    pub fn new(
        entries: Arc<dyn EntryRepository>,
        routines: Arc<dyn RoutineRepository>,
        selection: Arc<dyn SelectedRoutineRepository>,
        records: Arc<dyn EntryRecordRepository>,
        cache: Arc<dyn Cache>,
        ttl: Duration,
    ) -> Self {
        Self {
            entries,
            routines,
            selection,
            records,
            cache,
            ttl,
        }
    }

    /// Returns the populated selection, or `None` when nothing is selected.
    ///
    /// A selection pointing at a deleted routine reads as no selection.
    /// The populated view is cached under a single well-known key.
    pub async fn current(&self) -> Result<Option<SelectedRoutineView>, SelectionError> {
        let cache_key = selected_routine_key();

        if let Ok(Some(bytes)) = self.cache.get(&cache_key).await {
            if let Ok(view) = deserialize_value::<SelectedRoutineView>(&bytes) {
                tracing::trace!("Cache hit for selected routine");
                return Ok(Some(view));
            }
            tracing::warn!("Cache selected routine deserialization failed");
        }

        let Some(selection) = self.selection.get_selected().await? else {
            return Ok(None);
        };

        let Some(routine) = self.routines.get_routine(selection.routine).await? else {
            tracing::warn!(routine_id = %selection.routine, "Selection points at a deleted routine");
            return Ok(None);
        };

        let view = self.populate(selection, routine).await?;

        if let Ok(bytes) = serialize_value(&view) {
            if let Err(err) = self.cache.set(&cache_key, &bytes, Some(self.ttl)).await {
                tracing::warn!(error = %err, "Failed to cache selected routine");
            }
        }

        Ok(Some(view))
    }

    /// Makes `routine_id` the active routine, replacing any existing
    /// selection. Selecting the same routine again refreshes `selected_at`.
    pub async fn select(&self, routine_id: Uuid) -> Result<SelectedRoutineView, SelectionError> {
        let routine = self
            .routines
            .get_routine(routine_id)
            .await?
            .ok_or(SelectionError::RoutineNotFound(routine_id))?;

        let selection = SelectedRoutine::new(routine_id);
        self.selection.set_selected(&selection).await?;
        self.invalidate_selection_key().await;

        tracing::info!(routine_id = %routine_id, name = %routine.name, "Routine selected");
        self.populate(selection, routine).await
    }

    /// Clears the selection. Succeeds even when nothing is selected.
    pub async fn deselect(&self) -> Result<(), SelectionError> {
        self.selection.clear_selected().await?;
        self.invalidate_selection_key().await;

        tracing::info!("Routine deselected");
        Ok(())
    }

    /// Records `minutes` against an entry of the selected routine.
    ///
    /// Membership is checked against the selection loaded at the start of
    /// the call, not re-queried per step. Zero minutes is a no-op that
    /// writes nothing.
    pub async fn add_time(
        &self,
        entry_id: Uuid,
        minutes: u32,
    ) -> Result<TimeRecorded, SelectionError> {
        let selection = self
            .selection
            .get_selected()
            .await?
            .ok_or(SelectionError::NoSelection)?;

        let routine = self
            .routines
            .get_routine(selection.routine)
            .await?
            .ok_or(SelectionError::NoSelection)?;

        if !routine.entries.contains(&entry_id) {
            return Err(SelectionError::EntryNotInRoutine(entry_id));
        }

        if minutes == 0 {
            return Ok(TimeRecorded::NoTime);
        }

        let entry = self.entries.add_time_spent(entry_id, minutes).await?;

        let record = EntryRecord::new(entry_id, minutes);
        self.records.append_record(&record).await?;

        // Aggregate comes from a fresh resolve of the routine's ids so
        // concurrent increments on sibling entries are not missed.
        let resolved = self.entries.get_entries_by_ids(&routine.entries).await?;
        let total_time_spent = total_time_spent(&resolved);

        for key in [selected_routine_key(), routine_key(routine.id), entry_key(entry_id)] {
            if let Err(err) = self.cache.delete(&key).await {
                tracing::warn!(key = %key, error = %err, "Failed to invalidate cache key");
            }
        }

        tracing::info!(entry_id = %entry_id, minutes, total_time_spent, "Time recorded");
        Ok(TimeRecorded::Recorded {
            entry,
            total_time_spent,
            record,
        })
    }

    async fn populate(
        &self,
        selection: SelectedRoutine,
        routine: Routine,
    ) -> Result<SelectedRoutineView, SelectionError> {
        let entries = self.entries.get_entries_by_ids(&routine.entries).await?;
        let view = RoutineView::from_parts(routine, entries);
        Ok(SelectedRoutineView::from_parts(selection, view))
    }

    async fn invalidate_selection_key(&self) {
        if let Err(err) = self.cache.delete(&selected_routine_key()).await {
            tracing::warn!(error = %err, "Failed to invalidate selected routine cache");
        }
    }
}
