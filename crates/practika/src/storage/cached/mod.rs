//! Cached repository decorators.
//!
//! Wrap any repository backend with a read-through cache. The decorators
//! are generic over both the repository and the cache, so backends and
//! cache implementations compose freely.

mod entry;
mod routine;

pub use entry::CachedEntryRepository;
pub use routine::CachedRoutineRepository;
