use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use super::registry::{HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS};

/// Middleware to track HTTP request metrics.
///
/// Requests are labelled with their route template (`/uuid/:id`) so path
/// captures do not create new series; unmatched requests use the raw path.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = match req.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_string(),
        None => req.uri().path().to_string(),
    };

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &path, &status])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[&method, &path])
        .observe(duration);

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_track_metrics_records_request() {
        let app = Router::new()
            .route("/hello", get(|| async { "hello" }))
            .layer(middleware::from_fn(track_metrics));

        let request = axum::http::Request::builder()
            .uri("/hello")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let count = HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/hello", "200"])
            .get();
        assert!(count >= 1);

        let families = prometheus::gather();
        assert!(!families.is_empty());
    }

    #[tokio::test]
    async fn test_track_metrics_uses_route_template() {
        let app = Router::new()
            .route("/widgets/:id", get(|| async { "widget" }))
            .layer(middleware::from_fn(track_metrics));

        for id in ["1", "2", "3"] {
            let request = axum::http::Request::builder()
                .uri(format!("/widgets/{}", id))
                .body(Body::empty())
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let templated = HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/widgets/:id", "200"])
            .get();
        assert_eq!(templated, 3);

        let raw = HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/widgets/1", "200"])
            .get();
        assert_eq!(raw, 0);
    }
}
