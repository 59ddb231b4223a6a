//! Pure functions over the practice domain.
//!
//! Aggregates are folds over freshly fetched entries; callers are
//! responsible for re-reading entries from the store before computing them
//! so the totals never come from a stale snapshot.

use super::error::{EntryError, RoutineError};
use super::types::{Entry, Routine};

const MAX_NAME_LEN: usize = 100;

/// Sum of `scheduled_time` over the given entries, in minutes.
///
/// Saturates instead of wrapping: a routine holding duplicate heavy
/// entries yields `u32::MAX`, never a small wrapped total.
pub fn total_scheduled_time(entries: &[Entry]) -> u32 {
    entries
        .iter()
        .map(|e| e.scheduled_time)
        .fold(0u32, u32::saturating_add)
}

/// Sum of `time_spent` over the given entries, in minutes. Saturates like
/// [`total_scheduled_time`].
pub fn total_time_spent(entries: &[Entry]) -> u32 {
    entries
        .iter()
        .map(|e| e.time_spent)
        .fold(0u32, u32::saturating_add)
}

/// Validates an entry before creation or update.
pub fn validate_entry(entry: &Entry) -> Result<(), EntryError> {
    if entry.name.trim().is_empty() {
        return Err(EntryError::EmptyName);
    }
    if entry.name.len() > MAX_NAME_LEN {
        return Err(EntryError::NameTooLong);
    }
    if entry.scheduled_time == 0 {
        return Err(EntryError::ZeroScheduledTime);
    }
    Ok(())
}

/// Validates a routine before creation or update.
pub fn validate_routine(routine: &Routine) -> Result<(), RoutineError> {
    if routine.name.trim().is_empty() {
        return Err(RoutineError::EmptyName);
    }
    if routine.name.len() > MAX_NAME_LEN {
        return Err(RoutineError::NameTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_over_empty_slice_are_zero() {
        assert_eq!(total_scheduled_time(&[]), 0);
        assert_eq!(total_time_spent(&[]), 0);
    }

    #[test]
    fn test_totals_sum_all_entries() {
        let mut a = Entry::new("Scales", 15);
        a.time_spent = 10;
        let mut b = Entry::new("Arpeggios", 20);
        b.time_spent = 5;

        assert_eq!(total_scheduled_time(&[a.clone(), b.clone()]), 35);
        assert_eq!(total_time_spent(&[a, b]), 15);
    }

    #[test]
    fn test_totals_saturate_instead_of_wrapping() {
        let mut a = Entry::new("Scales", u32::MAX);
        a.time_spent = u32::MAX;
        let mut b = Entry::new("Arpeggios", 20);
        b.time_spent = 1;

        assert_eq!(total_scheduled_time(&[a.clone(), b.clone()]), u32::MAX);
        assert_eq!(total_time_spent(&[a, b]), u32::MAX);
    }

    #[test]
    fn test_validate_entry_rejects_empty_name() {
        let entry = Entry::new("   ", 15);
        assert_eq!(validate_entry(&entry), Err(EntryError::EmptyName));
    }

    #[test]
    fn test_validate_entry_rejects_zero_scheduled_time() {
        let entry = Entry::new("Scales", 0);
        assert_eq!(validate_entry(&entry), Err(EntryError::ZeroScheduledTime));
    }

    #[test]
    fn test_validate_entry_accepts_valid_entry() {
        let entry = Entry::new("Scales", 15);
        assert!(validate_entry(&entry).is_ok());
    }

    #[test]
    fn test_validate_routine_rejects_empty_name() {
        let routine = Routine::new("");
        assert_eq!(validate_routine(&routine), Err(RoutineError::EmptyName));
    }

    #[test]
    fn test_validate_routine_accepts_valid_routine() {
        let routine = Routine::new("Warm-up");
        assert!(validate_routine(&routine).is_ok());
    }
}
