use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use practika_core::practice::{EntryError, RoutineError};
use practika_core::storage::{repository_error_to_status_code, InvalidRecordRange, RepositoryError};

use crate::selection::SelectionError;

/// Boundary error type for handlers.
///
/// Wraps `anyhow::Error` and downcasts to the known error families to pick
/// a status code; everything unexpected is a 500. The body is always
/// `{"message": ...}`.
pub struct AppError(pub anyhow::Error);

fn repository_status(error: &RepositoryError) -> StatusCode {
    StatusCode::from_u16(repository_error_to_status_code(error))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            repository_status(repo_error)
        } else if let Some(selection_error) = self.0.downcast_ref::<SelectionError>() {
            match selection_error {
                SelectionError::NoSelection
                | SelectionError::RoutineNotFound(_)
                | SelectionError::EntryNotInRoutine(_) => StatusCode::NOT_FOUND,
                SelectionError::Repository(repo_error) => repository_status(repo_error),
            }
        } else if self.0.downcast_ref::<EntryError>().is_some()
            || self.0.downcast_ref::<RoutineError>().is_some()
            || self.0.downcast_ref::<InvalidRecordRange>().is_some()
            || self.0.downcast_ref::<JsonRejection>().is_some()
        {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status_code.is_server_error() {
            tracing::error!(status = %status_code, error = %self.0, "Request failed");
        } else {
            tracing::warn!(status = %status_code, error = %self.0, "Request rejected");
        }

        (status_code, Json(json!({ "message": self.0.to_string() }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
