pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/analyze/raw", post(handlers::handle_analyze_raw))
        .with_state(state)
}
