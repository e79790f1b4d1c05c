// HTTP request handlers
use crate::application::dispatcher::DispatchStats;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::dashboard::DashboardSnapshot;
use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct DashboardBody {
    #[serde(flatten)]
    snapshot: DashboardSnapshot,
    dispatch: DispatchStats,
}

#[derive(Serialize)]
pub struct ClearedAlerts {
    pub cleared: usize,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Full dashboard snapshot
pub async fn get_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let body = DashboardBody {
        snapshot: state.dashboard.snapshot(),
        dispatch: state.dispatcher.stats(),
    };
    match json_response(&body, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// History table rows, oldest first
pub async fn get_history(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match json_response(&state.dashboard.history(), accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Pending alerts, oldest first
pub async fn get_alerts(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match json_response(&state.dashboard.alerts(), accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Acknowledge all pending alerts
pub async fn clear_alerts(State(state): State<Arc<AppState>>) -> Json<ClearedAlerts> {
    let cleared = state.dashboard.clear_alerts();
    tracing::debug!("Cleared {} alerts", cleared);
    Json(ClearedAlerts { cleared })
}
