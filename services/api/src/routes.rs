use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use raiseready::workflows::fundraising::{
    fundraising_router, AuditSink, CompanyStore, DocumentStore, FundraisingService,
    NotificationSink,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_fundraising_routes<C, D, N, A>(
    service: Arc<FundraisingService<C, D, N, A>>,
) -> axum::Router
where
    C: CompanyStore + 'static,
    D: DocumentStore + 'static,
    N: NotificationSink + 'static,
    A: AuditSink + 'static,
{
    fundraising_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
