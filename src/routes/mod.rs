pub mod drafts;
pub mod health;
pub mod questions;
pub mod reference;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{auth::require_author, rate_limit};
use crate::AppState;

pub fn router(state: AppState, api_rps: u32) -> Router {
    let authoring_api = Router::new()
        .route("/api/questions", post(questions::submit_question))
        .route("/api/questions/validate", post(questions::validate_question))
        .route("/api/reference", get(reference::get_reference))
        .route("/api/drafts", post(drafts::create_draft))
        .route("/api/drafts/kind", post(drafts::change_kind))
        .route("/api/drafts/drag-drop", post(drafts::edit_drag_drop))
        .route("/api/drafts/validate", post(drafts::validate_draft))
        .layer(axum::middleware::from_fn(require_author))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RateLimiter::new(api_rps),
            rate_limit::rps_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .merge(authoring_api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
}
