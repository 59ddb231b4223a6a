pub mod entries;
pub mod entry_records;
pub mod error;
pub mod health;
pub mod routines;
pub mod selected_routine;

pub use error::AppError;
