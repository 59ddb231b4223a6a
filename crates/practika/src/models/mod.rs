mod entry;
mod routine;
mod selection;

pub use entry::{CreateEntry, UpdateEntry};
pub use routine::{CreateRoutine, UpdateRoutine};
pub use selection::{AddTimePayload, AddTimeResponse};
