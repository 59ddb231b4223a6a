//! Selected-routine handlers.
//!
//! Thin HTTP layer over [`SelectedRoutineManager`]; all sequencing and
//! cache discipline lives in the manager.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use uuid::Uuid;

use practika_core::practice::SelectedRoutineView;

use crate::{
    handlers::AppError,
    models::{AddTimePayload, AddTimeResponse},
    selection::{SelectionError, TimeRecorded},
    state::AppState,
};

/// Get the selected routine, populated (GET /api/selected-routine).
///
/// 404 when nothing is selected; no selection is a state, not a failure,
/// but the client contract surfaces it as not-found.
pub async fn get_selected_routine(
    State(state): State<AppState>,
) -> Result<Json<SelectedRoutineView>, AppError> {
    match state.selection.current().await? {
        Some(view) => Ok(Json(view)),
        None => Err(SelectionError::NoSelection.into()),
    }
}

/// Select a routine (POST /api/selected-routine/{id}/select).
pub async fn select_routine(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.selection.select(id).await?;
    Ok(Json(
        serde_json::json!({ "message": "Routine selected successfully" }),
    ))
}

/// Deselect the current routine (POST /api/selected-routine/deselect).
///
/// Always 200, selected or not.
pub async fn deselect_routine(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.selection.deselect().await?;
    Ok(Json(serde_json::json!({ "message": "Routine deselected" })))
}

/// Record time against an entry of the selected routine
/// (POST /api/selected-routine/entry/{entryId}/add-time).
pub async fn add_time(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
    payload: Result<Json<AddTimePayload>, JsonRejection>,
) -> Result<Json<AddTimeResponse>, AppError> {
    let Json(payload) = payload?;

    let response = match state.selection.add_time(entry_id, payload.time).await? {
        TimeRecorded::NoTime => AddTimeResponse {
            message: "no time added",
            updated_entry: None,
            total_time_spent: None,
            entry_record: None,
        },
        TimeRecorded::Recorded {
            entry,
            total_time_spent,
            record,
        } => AddTimeResponse {
            message: "Time added successfully",
            updated_entry: Some(entry),
            total_time_spent: Some(total_time_spent),
            entry_record: Some(record),
        },
    };

    Ok(Json(response))
}
