mod error;
mod keys;
mod patterns;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{
    entries_list_key, entries_list_pattern, entry_key, routine_key, routine_pattern,
    routines_list_key, routines_list_pattern, selected_routine_key,
};
pub use patterns::pattern_matches;
pub use serialization::{deserialize_value, serialize_value};
pub use traits::Cache;
