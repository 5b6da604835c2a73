use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use tracing::error;

use crate::AppState;

/// Health check: database and cache reachability as independent booleans.
/// Cache trouble degrades the status but never blocks traffic; a dead
/// database returns 503.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = match state.db.ping().await {
        Ok(()) => true,
        Err(e) => {
            error!("Database health check failed: {}", e);
            false
        }
    };
    let cache_healthy = state.cache.is_connected().await;

    let overall = if db_healthy && cache_healthy {
        "healthy"
    } else {
        "unhealthy"
    };
    let status_code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(json!({
            "status": overall,
            "version": env!("CARGO_PKG_VERSION"),
            "environment": state.config.environment,
            "services": {
                "database": if db_healthy { "healthy" } else { "unhealthy" },
                "cache": if cache_healthy { "healthy" } else { "unhealthy" },
            },
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// Readiness check: verifies the customers table answers a query.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.customers.list(1, None).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "message": "Service is ready to accept traffic",
            })),
        ),
        Err(e) => {
            error!("Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "message": format!("Service not ready: {}", e.response_message()),
                })),
            )
        }
    }
}

/// Cache statistics observability read.
pub async fn cache_stats(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.cache.stats().await;

    Json(json!({
        "system": "docu-api",
        "version": env!("CARGO_PKG_VERSION"),
        "cache": stats,
        "endpoints": {
            "graphql": "/graphql",
            "health": "/health",
            "stats": "/stats",
        },
    }))
}
