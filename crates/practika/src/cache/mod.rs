//! Cache backend implementations.
//!
//! Concrete implementations of the cache traits defined in
//! `practika_core::cache`.

pub mod memory;

pub use memory::MemoryCache;
