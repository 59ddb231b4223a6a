//! Cached entry repository decorator.
//!
//! Wraps an `EntryRepository` implementation with the read-through pattern:
//! reads check the cache first and populate it on miss; writes persist to
//! the repository and then invalidate every cached page the mutation could
//! have staled.
//!
//! Entries are embedded in populated routine views and in the selected
//! routine view, so entry mutations invalidate routine and selection keys
//! as well as their own.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use practika_core::cache::{
    deserialize_value, entries_list_key, entries_list_pattern, entry_key, routine_pattern,
    routines_list_pattern, selected_routine_key, serialize_value, Cache,
};
use practika_core::practice::Entry;
use practika_core::storage::{EntryRepository, ListQuery, Result};

/// Cached entry repository decorator.
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
/// * `C` - The cache implementation
pub struct CachedEntryRepository<R, C>
where
    R: EntryRepository,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<R, C> CachedEntryRepository<R, C>
where
    R: EntryRepository,
    C: Cache,
{
    /// Creates a new cached entry repository.
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
        }
    }

    /// Drops every cached value an entry mutation could have staled.
    async fn invalidate_after_mutation(&self, id: Uuid) {
        for key in [entry_key(id), selected_routine_key()] {
            if let Err(err) = self.cache.delete(&key).await {
                tracing::warn!(entry_id = %id, key = %key, error = %err, "Failed to invalidate cache key");
            }
        }
        for pattern in [
            entries_list_pattern(),
            routine_pattern(),
            routines_list_pattern(),
        ] {
            if let Err(err) = self.cache.delete_pattern(&pattern).await {
                tracing::warn!(entry_id = %id, pattern = %pattern, error = %err, "Failed to invalidate cache pattern");
            }
        }
    }
}

#[async_trait]
impl<R, C> EntryRepository for CachedEntryRepository<R, C>
where
    R: EntryRepository + 'static,
    C: Cache + 'static,
{
    async fn get_entry(&self, id: Uuid) -> Result<Option<Entry>> {
        let cache_key = entry_key(id);

        // Check cache first
        if let Ok(Some(bytes)) = self.cache.get(&cache_key).await {
            if let Ok(entry) = deserialize_value::<Entry>(&bytes) {
                tracing::trace!(entry_id = %id, "Cache hit for entry");
                return Ok(Some(entry));
            }
            // Deserialization failed - treat as cache miss
            tracing::warn!(entry_id = %id, "Cache entry deserialization failed");
        }

        tracing::trace!(entry_id = %id, "Cache miss for entry");
        let entry = self.repository.get_entry(id).await?;

        if let Some(ref e) = entry {
            if let Ok(bytes) = serialize_value(e) {
                if let Err(err) = self.cache.set(&cache_key, &bytes, Some(self.ttl)).await {
                    tracing::warn!(entry_id = %id, error = %err, "Failed to cache entry");
                }
            }
        }

        Ok(entry)
    }

    async fn get_entries_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Entry>> {
        // Never cached: aggregate computation depends on this being a
        // fresh store read.
        self.repository.get_entries_by_ids(ids).await
    }

    async fn list_entries(&self, query: &ListQuery) -> Result<Vec<Entry>> {
        let cache_key = entries_list_key(query);

        if let Ok(Some(bytes)) = self.cache.get(&cache_key).await {
            if let Ok(entries) = deserialize_value::<Vec<Entry>>(&bytes) {
                tracing::trace!(key = %cache_key, count = entries.len(), "Cache hit for entry list");
                return Ok(entries);
            }
            tracing::warn!(key = %cache_key, "Cache entry list deserialization failed");
        }

        tracing::trace!(key = %cache_key, "Cache miss for entry list");
        let entries = self.repository.list_entries(query).await?;

        if let Ok(bytes) = serialize_value(&entries) {
            if let Err(err) = self.cache.set(&cache_key, &bytes, Some(self.ttl)).await {
                tracing::warn!(key = %cache_key, error = %err, "Failed to cache entry list");
            }
        }

        Ok(entries)
    }

    async fn create_entry(&self, entry: &Entry) -> Result<()> {
        self.repository.create_entry(entry).await?;

        // A fresh id cannot appear in any routine yet; only list pages
        // go stale.
        if let Err(err) = self.cache.delete_pattern(&entries_list_pattern()).await {
            tracing::warn!(entry_id = %entry.id, error = %err, "Failed to invalidate entry list cache");
        }

        tracing::debug!(entry_id = %entry.id, name = %entry.name, "Entry created");
        Ok(())
    }

    async fn update_entry(&self, entry: &Entry) -> Result<()> {
        self.repository.update_entry(entry).await?;
        self.invalidate_after_mutation(entry.id).await;

        tracing::debug!(entry_id = %entry.id, "Entry updated");
        Ok(())
    }

    async fn delete_entry(&self, id: Uuid) -> Result<()> {
        self.repository.delete_entry(id).await?;
        self.invalidate_after_mutation(id).await;

        tracing::debug!(entry_id = %id, "Entry deleted");
        Ok(())
    }

    async fn add_time_spent(&self, id: Uuid, minutes: u32) -> Result<Entry> {
        let entry = self.repository.add_time_spent(id, minutes).await?;
        self.invalidate_after_mutation(id).await;

        tracing::debug!(entry_id = %id, minutes, time_spent = entry.time_spent, "Time recorded");
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::InMemoryRepository;
    use practika_core::storage::SortBy;

    fn cached(
        repo: Arc<InMemoryRepository>,
        cache: Arc<MemoryCache>,
    ) -> CachedEntryRepository<InMemoryRepository, MemoryCache> {
        CachedEntryRepository::new(repo, cache, Duration::from_secs(300))
    }

    #[tokio::test]
    async fn test_get_entry_populates_cache() {
        let repo = Arc::new(InMemoryRepository::new());
        let cache = Arc::new(MemoryCache::new(64));
        let entry = Entry::new("Scales", 15);
        repo.create_entry(&entry).await.unwrap();

        let cached_repo = cached(repo, cache.clone());
        let first = cached_repo.get_entry(entry.id).await.unwrap();
        assert_eq!(first, Some(entry.clone()));

        let bytes = cache.get(&entry_key(entry.id)).await.unwrap();
        assert!(bytes.is_some());
    }

    #[tokio::test]
    async fn test_stale_cache_value_is_served_until_invalidated() {
        let repo = Arc::new(InMemoryRepository::new());
        let cache = Arc::new(MemoryCache::new(64));
        let entry = Entry::new("Scales", 15);
        repo.create_entry(&entry).await.unwrap();

        let cached_repo = cached(repo.clone(), cache.clone());
        cached_repo.get_entry(entry.id).await.unwrap();

        // Mutate behind the decorator's back: the cache keeps serving the
        // old value because nothing invalidated it.
        let mut sneaky = entry.clone();
        sneaky.name = "Changed".to_string();
        repo.update_entry(&sneaky).await.unwrap();

        let read = cached_repo.get_entry(entry.id).await.unwrap().unwrap();
        assert_eq!(read.name, "Scales");
    }

    #[tokio::test]
    async fn test_update_invalidates_entry_and_view_keys() {
        let repo = Arc::new(InMemoryRepository::new());
        let cache = Arc::new(MemoryCache::new(64));
        let entry = Entry::new("Scales", 15);
        repo.create_entry(&entry).await.unwrap();

        let cached_repo = cached(repo, cache.clone());
        cached_repo.get_entry(entry.id).await.unwrap();
        cache.set(&selected_routine_key(), b"view", None).await.unwrap();

        let mut updated = entry.clone();
        updated.name = "Major scales".to_string();
        cached_repo.update_entry(&updated).await.unwrap();

        assert_eq!(cache.get(&entry_key(entry.id)).await.unwrap(), None);
        assert_eq!(cache.get(&selected_routine_key()).await.unwrap(), None);

        let read = cached_repo.get_entry(entry.id).await.unwrap().unwrap();
        assert_eq!(read.name, "Major scales");
    }

    #[tokio::test]
    async fn test_list_entries_cached_per_query_shape() {
        let repo = Arc::new(InMemoryRepository::new());
        let cache = Arc::new(MemoryCache::new(64));
        repo.create_entry(&Entry::new("Scales", 15)).await.unwrap();

        let cached_repo = cached(repo, cache.clone());
        let by_name = ListQuery::from_params(None, None, None, Some(SortBy::Name));
        let by_created = ListQuery::from_params(None, None, None, Some(SortBy::CreatedAt));

        cached_repo.list_entries(&by_name).await.unwrap();
        cached_repo.list_entries(&by_created).await.unwrap();

        assert!(cache.get(&entries_list_key(&by_name)).await.unwrap().is_some());
        assert!(cache.get(&entries_list_key(&by_created)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_invalidates_list_pages() {
        let repo = Arc::new(InMemoryRepository::new());
        let cache = Arc::new(MemoryCache::new(64));
        let cached_repo = cached(repo, cache.clone());

        let query = ListQuery::default();
        let empty = cached_repo.list_entries(&query).await.unwrap();
        assert!(empty.is_empty());

        cached_repo.create_entry(&Entry::new("Scales", 15)).await.unwrap();

        let fresh = cached_repo.list_entries(&query).await.unwrap();
        assert_eq!(fresh.len(), 1);
    }

    #[tokio::test]
    async fn test_add_time_spent_passes_through_and_invalidates() {
        let repo = Arc::new(InMemoryRepository::new());
        let cache = Arc::new(MemoryCache::new(64));
        let entry = Entry::new("Scales", 15);
        repo.create_entry(&entry).await.unwrap();

        let cached_repo = cached(repo, cache.clone());
        cached_repo.get_entry(entry.id).await.unwrap();

        let updated = cached_repo.add_time_spent(entry.id, 10).await.unwrap();
        assert_eq!(updated.time_spent, 10);

        let read = cached_repo.get_entry(entry.id).await.unwrap().unwrap();
        assert_eq!(read.time_spent, 10);
    }
}
