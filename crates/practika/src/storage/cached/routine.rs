//! Cached routine repository decorator.
//!
//! Routines are cached as raw documents (ordered entry id lists); the
//! populated view served over HTTP is assembled per request from fresh
//! entry reads, so entry edits never require routine keys to be correct
//! about entry contents, only about membership.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use practika_core::cache::{
    deserialize_value, routine_key, routines_list_key, routines_list_pattern,
    selected_routine_key, serialize_value, Cache,
};
use practika_core::practice::Routine;
use practika_core::storage::{ListQuery, Result, RoutineRepository};

/// Cached routine repository decorator.
pub struct CachedRoutineRepository<R, C>
where
    R: RoutineRepository,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<R, C> CachedRoutineRepository<R, C>
where
    R: RoutineRepository,
    C: Cache,
{
    /// Creates a new cached routine repository.
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
        }
    }

    /// Drops every cached value a routine mutation could have staled.
    /// The selected routine view embeds the routine, so it goes too.
    async fn invalidate_after_mutation(&self, id: Uuid) {
        for key in [routine_key(id), selected_routine_key()] {
            if let Err(err) = self.cache.delete(&key).await {
                tracing::warn!(routine_id = %id, key = %key, error = %err, "Failed to invalidate cache key");
            }
        }
        if let Err(err) = self.cache.delete_pattern(&routines_list_pattern()).await {
            tracing::warn!(routine_id = %id, error = %err, "Failed to invalidate routine list cache");
        }
    }
}

#[async_trait]
impl<R, C> RoutineRepository for CachedRoutineRepository<R, C>
where
    R: RoutineRepository + 'static,
    C: Cache + 'static,
{
    async fn get_routine(&self, id: Uuid) -> Result<Option<Routine>> {
        let cache_key = routine_key(id);

        if let Ok(Some(bytes)) = self.cache.get(&cache_key).await {
            if let Ok(routine) = deserialize_value::<Routine>(&bytes) {
                tracing::trace!(routine_id = %id, "Cache hit for routine");
                return Ok(Some(routine));
            }
            tracing::warn!(routine_id = %id, "Cache routine deserialization failed");
        }

        tracing::trace!(routine_id = %id, "Cache miss for routine");
        let routine = self.repository.get_routine(id).await?;

        if let Some(ref r) = routine {
            if let Ok(bytes) = serialize_value(r) {
                if let Err(err) = self.cache.set(&cache_key, &bytes, Some(self.ttl)).await {
                    tracing::warn!(routine_id = %id, error = %err, "Failed to cache routine");
                }
            }
        }

        Ok(routine)
    }

    async fn list_routines(&self, query: &ListQuery) -> Result<Vec<Routine>> {
        let cache_key = routines_list_key(query);

        if let Ok(Some(bytes)) = self.cache.get(&cache_key).await {
            if let Ok(routines) = deserialize_value::<Vec<Routine>>(&bytes) {
                tracing::trace!(key = %cache_key, count = routines.len(), "Cache hit for routine list");
                return Ok(routines);
            }
            tracing::warn!(key = %cache_key, "Cache routine list deserialization failed");
        }

        tracing::trace!(key = %cache_key, "Cache miss for routine list");
        let routines = self.repository.list_routines(query).await?;

        if let Ok(bytes) = serialize_value(&routines) {
            if let Err(err) = self.cache.set(&cache_key, &bytes, Some(self.ttl)).await {
                tracing::warn!(key = %cache_key, error = %err, "Failed to cache routine list");
            }
        }

        Ok(routines)
    }

    async fn create_routine(&self, routine: &Routine) -> Result<()> {
        self.repository.create_routine(routine).await?;

        if let Err(err) = self.cache.delete_pattern(&routines_list_pattern()).await {
            tracing::warn!(routine_id = %routine.id, error = %err, "Failed to invalidate routine list cache");
        }

        tracing::debug!(routine_id = %routine.id, name = %routine.name, "Routine created");
        Ok(())
    }

    async fn update_routine(&self, routine: &Routine) -> Result<()> {
        self.repository.update_routine(routine).await?;
        self.invalidate_after_mutation(routine.id).await;

        tracing::debug!(routine_id = %routine.id, "Routine updated");
        Ok(())
    }

    async fn delete_routine(&self, id: Uuid) -> Result<()> {
        self.repository.delete_routine(id).await?;
        self.invalidate_after_mutation(id).await;

        tracing::debug!(routine_id = %id, "Routine deleted");
        Ok(())
    }
}
