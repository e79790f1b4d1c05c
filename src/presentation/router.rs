// Router construction
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    clear_alerts, get_alerts, get_dashboard, get_history, health_check,
};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/history", get(get_history))
        .route("/alerts", get(get_alerts).delete(clear_alerts))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
