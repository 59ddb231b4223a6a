mod error;
mod operations;
mod types;

pub use error::{EntryError, RoutineError};
pub use operations::{
    total_scheduled_time, total_time_spent, validate_entry, validate_routine,
};
pub use types::{
    Entry, EntryRecord, EntryRecordView, Routine, RoutineView, SelectedRoutine,
    SelectedRoutineView,
};
