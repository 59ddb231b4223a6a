//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use practika_core::practice::{Entry, EntryRecord, Routine, SelectedRoutine};
use practika_core::storage::{
    EntryRecordRepository, EntryRepository, ListQuery, RepositoryError, Result,
    RoutineRepository, SelectedRoutineRepository, SortBy,
};

/// In-memory storage backend.
///
/// Uses maps wrapped in `Arc<RwLock<_>>` for thread-safe access. The
/// selected routine lives in a single `Option` slot, so replacing or
/// clearing it is one atomic write — the singleton invariant holds by
/// construction. Data is not persisted and will be lost when the
/// repository is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    entries: Arc<RwLock<HashMap<Uuid, Entry>>>,
    routines: Arc<RwLock<HashMap<Uuid, Routine>>>,
    records: Arc<RwLock<Vec<EntryRecord>>>,
    selected: Arc<RwLock<Option<SelectedRoutine>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            routines: Arc::new(RwLock::new(HashMap::new())),
            records: Arc::new(RwLock::new(Vec::new())),
            selected: Arc::new(RwLock::new(None)),
        }
    }
}

/// Applies filter, sort, and pagination to a snapshot of documents.
fn apply_list_query<T>(
    mut items: Vec<T>,
    query: &ListQuery,
    name: impl Fn(&T) -> &str,
    created_at: impl Fn(&T) -> DateTime<Utc>,
) -> Vec<T> {
    items.retain(|item| query.matches_name(name(item)));
    match query.sort_by {
        SortBy::Name => items.sort_by(|a, b| name(a).to_lowercase().cmp(&name(b).to_lowercase())),
        SortBy::CreatedAt => items.sort_by_key(|item| created_at(item)),
    }
    items
        .into_iter()
        .skip(query.offset())
        .take(query.limit)
        .collect()
}

#[async_trait]
impl EntryRepository for InMemoryRepository {
    async fn get_entry(&self, id: Uuid) -> Result<Option<Entry>> {
        let entries = self.entries.read().await;
        Ok(entries.get(&id).cloned())
    }

    async fn get_entries_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Entry>> {
        let entries = self.entries.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| entries.get(id).cloned())
            .collect())
    }

    async fn list_entries(&self, query: &ListQuery) -> Result<Vec<Entry>> {
        let entries = self.entries.read().await;
        let snapshot: Vec<Entry> = entries.values().cloned().collect();
        Ok(apply_list_query(
            snapshot,
            query,
            |e| e.name.as_str(),
            |e| e.created_at,
        ))
    }

    async fn create_entry(&self, entry: &Entry) -> Result<()> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&entry.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Entry",
                id: entry.id.to_string(),
            });
        }
        entries.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn update_entry(&self, entry: &Entry) -> Result<()> {
        let mut entries = self.entries.write().await;
        if !entries.contains_key(&entry.id) {
            return Err(RepositoryError::not_found("Entry", entry.id));
        }
        entries.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn delete_entry(&self, id: Uuid) -> Result<()> {
        let mut entries = self.entries.write().await;
        if entries.remove(&id).is_none() {
            return Err(RepositoryError::not_found("Entry", id));
        }
        Ok(())
    }

    async fn add_time_spent(&self, id: Uuid, minutes: u32) -> Result<Entry> {
        // Read-modify-write under a single write lock: concurrent calls
        // serialize here, so no increment is ever lost. The total saturates
        // instead of wrapping, so accumulation stays monotonic at the top
        // of the range.
        let mut entries = self.entries.write().await;
        let entry = entries
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("Entry", id))?;
        entry.time_spent = entry.time_spent.saturating_add(minutes);
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }
}

#[async_trait]
impl RoutineRepository for InMemoryRepository {
    async fn get_routine(&self, id: Uuid) -> Result<Option<Routine>> {
        let routines = self.routines.read().await;
        Ok(routines.get(&id).cloned())
    }

    async fn list_routines(&self, query: &ListQuery) -> Result<Vec<Routine>> {
        let routines = self.routines.read().await;
        let snapshot: Vec<Routine> = routines.values().cloned().collect();
        Ok(apply_list_query(
            snapshot,
            query,
            |r| r.name.as_str(),
            |r| r.created_at,
        ))
    }

    async fn create_routine(&self, routine: &Routine) -> Result<()> {
        let mut routines = self.routines.write().await;
        if routines.contains_key(&routine.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Routine",
                id: routine.id.to_string(),
            });
        }
        routines.insert(routine.id, routine.clone());
        Ok(())
    }

    async fn update_routine(&self, routine: &Routine) -> Result<()> {
        let mut routines = self.routines.write().await;
        if !routines.contains_key(&routine.id) {
            return Err(RepositoryError::not_found("Routine", routine.id));
        }
        routines.insert(routine.id, routine.clone());
        Ok(())
    }

    async fn delete_routine(&self, id: Uuid) -> Result<()> {
        let mut routines = self.routines.write().await;
        if routines.remove(&id).is_none() {
            return Err(RepositoryError::not_found("Routine", id));
        }
        Ok(())
    }
}

#[async_trait]
impl SelectedRoutineRepository for InMemoryRepository {
    async fn get_selected(&self) -> Result<Option<SelectedRoutine>> {
        let selected = self.selected.read().await;
        Ok(selected.clone())
    }

    async fn set_selected(&self, selection: &SelectedRoutine) -> Result<()> {
        let mut selected = self.selected.write().await;
        *selected = Some(selection.clone());
        Ok(())
    }

    async fn clear_selected(&self) -> Result<()> {
        let mut selected = self.selected.write().await;
        *selected = None;
        Ok(())
    }
}

#[async_trait]
impl EntryRecordRepository for InMemoryRepository {
    async fn append_record(&self, record: &EntryRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.push(record.clone());
        Ok(())
    }

    async fn get_records_since(&self, since: DateTime<Utc>) -> Result<Vec<EntryRecord>> {
        let records = self.records.read().await;
        let mut matching: Vec<EntryRecord> = records
            .iter()
            .filter(|r| r.date >= since)
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.date);
        Ok(matching)
    }
}
