use thiserror::Error;

/// Errors that can occur when validating entries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("Entry name cannot be empty")]
    EmptyName,
    #[error("Entry name too long (max 100 characters)")]
    NameTooLong,
    #[error("Scheduled time must be a positive number of minutes")]
    ZeroScheduledTime,
}

/// Errors that can occur when validating routines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoutineError {
    #[error("Routine name cannot be empty")]
    EmptyName,
    #[error("Routine name too long (max 100 characters)")]
    NameTooLong,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_error_display() {
        assert_eq!(EntryError::EmptyName.to_string(), "Entry name cannot be empty");
        assert_eq!(
            EntryError::ZeroScheduledTime.to_string(),
            "Scheduled time must be a positive number of minutes"
        );
    }

    #[test]
    fn test_routine_error_display() {
        assert_eq!(
            RoutineError::EmptyName.to_string(),
            "Routine name cannot be empty"
        );
    }
}
