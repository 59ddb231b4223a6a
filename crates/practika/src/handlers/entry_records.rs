//! Entry record reporting handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use practika_core::practice::EntryRecordView;
use practika_core::storage::RecordRange;

use crate::{handlers::AppError, state::AppState};

/// List entry records for a window (GET /api/entry-records/{dateRange}).
///
/// `dateRange` is one of `week`, `month`, `year`; anything else is a 400.
/// Records are joined with their entries; a record whose entry was deleted
/// keeps a null entry rather than being hidden. Always a fresh store read.
pub async fn list_entry_records(
    State(state): State<AppState>,
    Path(date_range): Path<String>,
) -> Result<Json<Vec<EntryRecordView>>, AppError> {
    let range: RecordRange = date_range.parse()?;

    let since = range.start_from(Utc::now());
    let records = state.record_repo.get_records_since(since).await?;

    let mut views = Vec::with_capacity(records.len());
    for record in records {
        let entry = state.entry_repo.get_entry(record.entry).await?;
        views.push(EntryRecordView::from_parts(record, entry));
    }

    Ok(Json(views))
}
