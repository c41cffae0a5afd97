use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use super::AppState;

/// Health check endpoint
/// Returns 200 OK if the service is running
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "service": "school-booking",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Readiness check endpoint
/// Returns 200 OK once the booking store answers queries
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.count().await {
        Ok(bookings) => (StatusCode::OK, Json(json!({
            "status": "ready",
            "service": "school-booking",
            "bookings": bookings,
        }))),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({
                "status": "unavailable",
                "service": "school-booking",
            })))
        }
    }
}
