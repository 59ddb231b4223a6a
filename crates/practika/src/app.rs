use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        entries::{create_entry, delete_entry, get_entry, list_entries, update_entry},
        entry_records::list_entry_records,
        health::health,
        routines::{create_routine, delete_routine, get_routine, list_routines, update_routine},
        selected_routine::{add_time, deselect_routine, get_selected_routine, select_routine},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    // API routes with CORS
    let api_routes = Router::new()
        // Entry routes
        .route("/entries", get(list_entries).post(create_entry))
        .route(
            "/entries/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        // Routine routes
        .route("/routines", get(list_routines).post(create_routine))
        .route(
            "/routines/{id}",
            get(get_routine).put(update_routine).delete(delete_routine),
        )
        // Selected-routine routes. "deselect" must not be swallowed by the
        // "{id}/select" pattern, so it gets its own literal segment.
        .route("/selected-routine", get(get_selected_routine))
        .route("/selected-routine/{id}/select", post(select_routine))
        .route("/selected-routine/deselect", post(deselect_routine))
        .route("/selected-routine/entry/{entry_id}/add-time", post(add_time))
        // Entry record reporting
        .route("/entry-records/{date_range}", get(list_entry_records))
        .layer(cors);

    // Main application router
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
