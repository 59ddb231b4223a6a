//! Routine CRUD handlers.
//!
//! Responses carry populated views: entry ids resolved to full entries,
//! in routine order, with aggregate totals computed from a fresh read.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use practika_core::practice::{validate_routine, Routine, RoutineView};
use practika_core::storage::RepositoryError;

use crate::{
    handlers::entries::ListParams,
    handlers::AppError,
    models::{CreateRoutine, UpdateRoutine},
    state::AppState,
};

async fn populate(state: &AppState, routine: Routine) -> Result<RoutineView, AppError> {
    let entries = state.entry_repo.get_entries_by_ids(&routine.entries).await?;
    Ok(RoutineView::from_parts(routine, entries))
}

/// List routines (GET /api/routines), populated.
pub async fn list_routines(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<RoutineView>>, AppError> {
    let routines = state
        .routine_repo
        .list_routines(&params.into_query())
        .await?;

    let mut views = Vec::with_capacity(routines.len());
    for routine in routines {
        views.push(populate(&state, routine).await?);
    }
    Ok(Json(views))
}

/// Get a single routine by ID (GET /api/routines/{id}), populated.
pub async fn get_routine(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RoutineView>, AppError> {
    let routine = state
        .routine_repo
        .get_routine(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Routine", id))?;

    Ok(Json(populate(&state, routine).await?))
}

/// Create a new routine (POST /api/routines).
///
/// Entry ids are not checked for existence; dangling references are
/// tolerated and skipped on population.
pub async fn create_routine(
    State(state): State<AppState>,
    payload: Result<Json<CreateRoutine>, JsonRejection>,
) -> Result<(StatusCode, Json<RoutineView>), AppError> {
    let Json(payload) = payload?;

    let routine = payload.into_routine();
    validate_routine(&routine)?;

    state.routine_repo.create_routine(&routine).await?;

    tracing::info!(routine_id = %routine.id, name = %routine.name, "Created routine");
    Ok((StatusCode::CREATED, Json(populate(&state, routine).await?)))
}

/// Update a routine (PUT /api/routines/{id}).
pub async fn update_routine(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateRoutine>, JsonRejection>,
) -> Result<Json<RoutineView>, AppError> {
    let Json(payload) = payload?;

    let mut routine = state
        .routine_repo
        .get_routine(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Routine", id))?;

    payload.apply_to(&mut routine);
    validate_routine(&routine)?;

    state.routine_repo.update_routine(&routine).await?;
    Ok(Json(populate(&state, routine).await?))
}

/// Delete a routine (DELETE /api/routines/{id}).
///
/// An existing selection pointing at the deleted routine is left in
/// place; it reads as no selection afterwards.
pub async fn delete_routine(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.routine_repo.delete_routine(id).await?;
    Ok(Json(serde_json::json!({ "message": "Routine deleted" })))
}
