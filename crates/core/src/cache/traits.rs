use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Trait for basic cache operations.
///
/// The cache is a performance layer only: its absence must never change
/// observable behavior. Values are opaque bytes; serialization lives in
/// [`super::serialization`].
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key. Expired entries read as absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Deletes all values matching a pattern (e.g., "entries:*").
    ///
    /// Used after mutations so every cached list/detail page for the
    /// affected collection becomes stale-safe.
    async fn delete_pattern(&self, pattern: &str) -> Result<()>;
}
