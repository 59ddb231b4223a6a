//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. Repositories are trait objects so backends and cache
//! wrappers compose without the handlers knowing.

use std::sync::Arc;

use practika_core::storage::{EntryRecordRepository, EntryRepository, RoutineRepository};

use crate::cache::MemoryCache;
use crate::config::Config;
use crate::selection::SelectedRoutineManager;
use crate::storage::{CachedEntryRepository, CachedRoutineRepository, InMemoryRepository};

/// Shared application state.
///
/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Entry repository (cached, wraps underlying storage).
    pub entry_repo: Arc<dyn EntryRepository>,
    /// Routine repository (cached, wraps underlying storage).
    pub routine_repo: Arc<dyn RoutineRepository>,
    /// Entry record log. Uncached: reporting reads are always fresh.
    pub record_repo: Arc<dyn EntryRecordRepository>,
    /// Selected-routine workflow coordinator.
    pub selection: SelectedRoutineManager,
}

impl AppState {
    /// Creates the state with the in-memory backend and an in-process
    /// LRU cache, wired per the configuration.
    pub fn new(config: &Config) -> Self {
        let store = Arc::new(InMemoryRepository::new());
        let cache = Arc::new(MemoryCache::new(config.cache_max_entries));
        let ttl = config.cache_ttl();

        let entry_repo: Arc<dyn EntryRepository> = Arc::new(CachedEntryRepository::new(
            store.clone(),
            cache.clone(),
            ttl,
        ));
        let routine_repo: Arc<dyn RoutineRepository> = Arc::new(CachedRoutineRepository::new(
            store.clone(),
            cache.clone(),
            ttl,
        ));

        let selection = SelectedRoutineManager::new(
            entry_repo.clone(),
            routine_repo.clone(),
            store.clone(),
            store.clone(),
            cache.clone(),
            ttl,
        );

        Self {
            entry_repo,
            routine_repo,
            record_repo: store,
            selection,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::from_env())
    }
}
