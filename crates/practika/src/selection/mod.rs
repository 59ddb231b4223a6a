//! Selected-routine workflow.

mod manager;

pub use manager::{SelectedRoutineManager, SelectionError, TimeRecorded};
