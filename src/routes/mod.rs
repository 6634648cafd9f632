pub mod auth_routes;
pub mod vehicle_routes;

use axum::{routing::get, Json, Router};
use serde_json::json;

use crate::admin;
use crate::state::AppState;

/// Router completo: API REST, consola administrativa y health check
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_endpoint))
        .nest(
            "/api/vehicles",
            vehicle_routes::create_vehicle_router(state.clone()),
        )
        .nest("/api/admin", auth_routes::create_auth_router(state.clone()))
        .nest("/admin", admin::create_admin_router(state.clone()))
        .with_state(state)
}

/// Endpoint de salud simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "vehicle-inventory",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
