//! Router assembly: health routes, the not-found fallback and the trace layer

use crate::core::{BizError, RequestError};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Fallback for any method/path pair no route handles.
///
/// The returned error goes through the same responder as every other
/// failure, producing `{"error":{"message":"Not Found","status":404}}`.
pub async fn not_found() -> BizError {
    RequestError::RouteNotFound.into()
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

/// Health check endpoint handler
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "biztime"
    }))
}

/// Install the fallbacks and request tracing on a fully merged router.
///
/// Must run after every route is registered: the method fallback only
/// applies to routes that already exist.
pub fn finalize(router: Router) -> Router {
    router
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
