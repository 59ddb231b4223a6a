//! Serializing/deserializing domain values to/from cache bytes.
//!
//! JSON is used for cache storage so cached values stay human-readable and
//! easy to inspect. A value that fails to deserialize is treated by callers
//! as a cache miss, never as an error.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{CacheError, Result};

/// Serializes a value to JSON bytes for cache storage.
pub fn serialize_value<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| CacheError::Serialization(e.to_string()))
}

/// Deserializes JSON cache bytes back into a value.
pub fn deserialize_value<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| CacheError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::practice::{Entry, Routine, RoutineView};

    #[test]
    fn test_roundtrip_entry() {
        let entry = Entry::new("Scales", 15).with_description("C major, two octaves");

        let bytes = serialize_value(&entry).expect("serialize should succeed");
        let back: Entry = deserialize_value(&bytes).expect("deserialize should succeed");

        assert_eq!(entry, back);
    }

    #[test]
    fn test_roundtrip_routine_view() {
        let entries = vec![Entry::new("Scales", 15), Entry::new("Arpeggios", 20)];
        let routine = Routine::new("Warm-up").with_entries(entries.iter().map(|e| e.id).collect());
        let view = RoutineView::from_parts(routine, entries);

        let bytes = serialize_value(&view).expect("serialize should succeed");
        let back: RoutineView = deserialize_value(&bytes).expect("deserialize should succeed");

        assert_eq!(view, back);
    }

    #[test]
    fn test_deserialize_malformed_bytes() {
        let result: Result<Entry> = deserialize_value(b"not valid json");

        assert!(matches!(result, Err(CacheError::Serialization(_))));
    }

    #[test]
    fn test_empty_vec_roundtrip() {
        let entries: Vec<Entry> = vec![];
        let bytes = serialize_value(&entries).expect("serialize should succeed");
        assert_eq!(bytes, b"[]");

        let back: Vec<Entry> = deserialize_value(&bytes).expect("deserialize should succeed");
        assert!(back.is_empty());
    }
}
