//! Route table

use crate::handlers;
use crate::AppState;
use axum::{
    extract::Request,
    routing::{get, put},
    Router,
};
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Build the application router.
///
/// When `static_dir` is given, unmatched paths are served from it. Every
/// request span records the storage mode it was served from.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let mode = state.mode;
    let trace = TraceLayer::new_for_http().make_span_with(move |request: &Request| {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            storage = %mode,
        )
    });

    let router = Router::new().nest("/api", api_routes());

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(trace).with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/items",
            get(handlers::items::list).post(handlers::items::create),
        )
        .route(
            "/items/:id",
            put(handlers::items::update).delete(handlers::items::delete),
        )
}
