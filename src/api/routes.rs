use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    get_float, get_int, get_time, get_uint, get_uuid, health, not_found, AppState,
};
use super::middleware::logging_middleware;
use super::openapi::openapi_json;
use crate::metrics;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health))
        // Parameter parsing endpoints
        .route("/uuid/:id", get(get_uuid))
        .route("/int/:value", get(get_int))
        .route("/uint/:value", get(get_uint))
        .route("/float/:value", get(get_float))
        .route("/time/:value", get(get_time))
        // Metrics endpoint (Prometheus)
        .route("/metrics", get(metrics::metrics_handler))
        // OpenAPI documentation
        .route("/api-docs/openapi.json", get(openapi_json))
        .fallback(not_found)
        // Add middleware (order matters: logging -> metrics -> cors -> trace)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics::middleware::track_metrics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
