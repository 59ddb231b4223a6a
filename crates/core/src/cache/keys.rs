//! Cache key constructors.
//!
//! Keys are namespaced by collection so a mutation can drop everything the
//! collection contributed to the cache with a single pattern delete. List
//! keys encode the full query shape, so distinct pages/filters never
//! collide.

use uuid::Uuid;

use crate::storage::ListQuery;

/// Returns the cache key for a single entry.
pub fn entry_key(entry_id: Uuid) -> String {
    format!("entry:{entry_id}")
}

/// Returns the cache key for an entry list page.
pub fn entries_list_key(query: &ListQuery) -> String {
    format!(
        "entries:{}:{}:{}:{}",
        query.page,
        query.limit,
        query.name.as_deref().unwrap_or("-"),
        query.sort_by.as_str()
    )
}

/// Returns the pattern matching all entry list keys.
pub fn entries_list_pattern() -> String {
    "entries:*".to_string()
}

/// Returns the cache key for a single routine.
pub fn routine_key(routine_id: Uuid) -> String {
    format!("routine:{routine_id}")
}

/// Returns the pattern matching all single-routine keys.
pub fn routine_pattern() -> String {
    "routine:*".to_string()
}

/// Returns the cache key for a routine list page.
pub fn routines_list_key(query: &ListQuery) -> String {
    format!(
        "routines:{}:{}:{}:{}",
        query.page,
        query.limit,
        query.name.as_deref().unwrap_or("-"),
        query.sort_by.as_str()
    )
}

/// Returns the pattern matching all routine list keys.
pub fn routines_list_pattern() -> String {
    "routines:*".to_string()
}

/// Returns the cache key for the selected-routine singleton view.
pub fn selected_routine_key() -> String {
    "selected_routine".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SortBy;

    fn test_uuid() -> Uuid {
        Uuid::nil()
    }

    #[test]
    fn test_entry_key() {
        assert_eq!(
            entry_key(test_uuid()),
            "entry:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_routine_key() {
        assert_eq!(
            routine_key(test_uuid()),
            "routine:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_entries_list_key_without_filter() {
        let query = ListQuery::default();
        assert_eq!(entries_list_key(&query), "entries:1:50:-:createdAt");
    }

    #[test]
    fn test_entries_list_key_with_filter_and_sort() {
        let query = ListQuery {
            page: 2,
            limit: 10,
            name: Some("sca".to_string()),
            sort_by: SortBy::Name,
        };
        assert_eq!(entries_list_key(&query), "entries:2:10:sca:name");
    }

    #[test]
    fn test_routines_list_key() {
        let query = ListQuery::default();
        assert_eq!(routines_list_key(&query), "routines:1:50:-:createdAt");
    }

    #[test]
    fn test_selected_routine_key_is_fixed() {
        assert_eq!(selected_routine_key(), "selected_routine");
    }

    #[test]
    fn test_patterns_cover_their_keys() {
        use crate::cache::pattern_matches;

        assert!(pattern_matches(
            &entries_list_pattern(),
            &entries_list_key(&ListQuery::default())
        ));
        assert!(pattern_matches(&routine_pattern(), &routine_key(test_uuid())));
        assert!(pattern_matches(
            &routines_list_pattern(),
            &routines_list_key(&ListQuery::default())
        ));

        // List patterns must not bleed into detail keys or the singleton
        assert!(!pattern_matches(&entries_list_pattern(), &entry_key(test_uuid())));
        assert!(!pattern_matches(&entries_list_pattern(), &selected_routine_key()));
    }
}
