//! Entry CRUD handlers.
//!
//! These handlers use repository trait objects for database access.
//! Cache invalidation is handled by the cached repository decorator.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use practika_core::practice::{validate_entry, Entry};
use practika_core::storage::{ListQuery, RepositoryError, SortBy};

use crate::{
    handlers::AppError,
    models::{CreateEntry, UpdateEntry},
    state::AppState,
};

/// Query parameters for listing entries.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    /// Case-insensitive substring filter on the name.
    pub name: Option<String>,
    pub sort_by: Option<SortBy>,
}

impl ListParams {
    pub fn into_query(self) -> ListQuery {
        ListQuery::from_params(self.page, self.limit, self.name, self.sort_by)
    }
}

/// List entries (GET /api/entries).
pub async fn list_entries(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Entry>>, AppError> {
    let entries = state.entry_repo.list_entries(&params.into_query()).await?;
    Ok(Json(entries))
}

/// Get a single entry by ID (GET /api/entries/{id}).
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Entry>, AppError> {
    match state.entry_repo.get_entry(id).await? {
        Some(entry) => Ok(Json(entry)),
        None => Err(RepositoryError::not_found("Entry", id).into()),
    }
}

/// Create a new entry (POST /api/entries).
pub async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<CreateEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<Entry>), AppError> {
    let Json(payload) = payload?;

    let entry = payload.into_entry();
    validate_entry(&entry)?;

    state.entry_repo.create_entry(&entry).await?;

    tracing::info!(entry_id = %entry.id, name = %entry.name, "Created entry");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Update an entry (PUT /api/entries/{id}).
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateEntry>, JsonRejection>,
) -> Result<Json<Entry>, AppError> {
    let Json(payload) = payload?;

    let mut entry = state
        .entry_repo
        .get_entry(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Entry", id))?;

    payload.apply_to(&mut entry);
    validate_entry(&entry)?;

    state.entry_repo.update_entry(&entry).await?;
    Ok(Json(entry))
}

/// Delete an entry (DELETE /api/entries/{id}).
///
/// Routines and records keep their references; dangling ids are skipped
/// or surfaced as nulls on population.
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.entry_repo.delete_entry(id).await?;
    Ok(Json(serde_json::json!({ "message": "Entry deleted" })))
}
