//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `practika_core::storage`, plus caching decorators that wrap them.

pub mod cached;
pub mod inmemory;

pub use cached::{CachedEntryRepository, CachedRoutineRepository};
pub use inmemory::InMemoryRepository;
