// HTTP request handlers
use crate::application::generator_service::RenderedDashboard;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboards", get(list_dashboards))
        .route("/dashboards/:uid", get(get_dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Uid, title and panel count of every dashboard, in catalog order
pub async fn list_dashboards(State(state): State<Arc<AppState>>) -> Json<Vec<RenderedDashboard>> {
    Json(state.dashboards.clone())
}

/// The rendered JSON of a single dashboard
pub async fn get_dashboard(
    Path(uid): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.find(&uid) {
        Some(dashboard) => (
            [(header::CONTENT_TYPE, "application/json")],
            dashboard.json.clone(),
        )
            .into_response(),
        None => {
            warn!("Unknown dashboard requested: {}", uid);
            (StatusCode::NOT_FOUND, format!("unknown dashboard uid: {}", uid)).into_response()
        }
    }
}
