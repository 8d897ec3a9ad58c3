use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::fundraising::router::{self, fundraising_router};

fn service_handle() -> (Arc<MemoryService>, Arc<MemoryCompanies>) {
    let (service, companies, _, _, _) = build_service();
    (Arc::new(service), companies)
}

#[tokio::test]
async fn score_handler_returns_breakdown_payload() {
    let (service, companies) = service_handle();
    let id = seed_company(&companies, "route-score", 500_000.0, true, false);

    let response = router::score_handler::<
        MemoryCompanies,
        MemoryDocuments,
        MemoryNotifications,
        MemoryAudit,
    >(State(service), Path(id.0.clone()))
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["score"], 43);
    assert_eq!(payload["breakdown"]["kyc_verified"], 30);
    assert_eq!(payload["breakdown"]["revenue_score"], 13);
}

#[tokio::test]
async fn score_handler_maps_missing_company_to_not_found() {
    let (service, _) = service_handle();

    let response = router::score_handler::<
        MemoryCompanies,
        MemoryDocuments,
        MemoryNotifications,
        MemoryAudit,
    >(State(service), Path("co-missing".to_string()))
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn repeat_kyc_verification_maps_to_bad_request() {
    let (service, companies) = service_handle();
    let id = seed_company(&companies, "route-kyc", 0.0, true, false);

    let response = router::verify_kyc_handler::<
        MemoryCompanies,
        MemoryDocuments,
        MemoryNotifications,
        MemoryAudit,
    >(State(service), Path(id.0.clone()))
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("already completed"));
}

#[tokio::test]
async fn duplicate_onboarding_maps_to_conflict() {
    let (service, _) = service_handle();

    router::onboard_handler::<
        MemoryCompanies,
        MemoryDocuments,
        MemoryNotifications,
        MemoryAudit,
    >(State(service.clone()), axum::Json(new_company("route-dup")))
    .await;

    let response = router::onboard_handler::<
        MemoryCompanies,
        MemoryDocuments,
        MemoryNotifications,
        MemoryAudit,
    >(State(service), axum::Json(new_company("route-dup")))
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn invalid_document_maps_to_unprocessable_entity() {
    let (service, companies) = service_handle();
    let id = seed_company(&companies, "route-doc", 0.0, false, false);

    let mut payload = pitch_deck();
    payload.size = 0;

    let response = router::add_document_handler::<
        MemoryCompanies,
        MemoryDocuments,
        MemoryNotifications,
        MemoryAudit,
    >(State(service), Path(id.0.clone()), axum::Json(payload))
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn recalculate_route_returns_the_fresh_score() {
    let (service, companies) = service_handle();
    let id = seed_company(&companies, "route-recalc", 1_000_000.0, true, true);

    let router = fundraising_router(service);
    let response = router
        .oneshot(
            axum::http::Request::post(format!("/api/v1/score/{}/recalculate", id.0))
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["score"], 75);
}

#[tokio::test]
async fn recommendations_route_returns_string_array() {
    let (service, companies) = service_handle();
    let id = seed_company(&companies, "route-recs", 0.0, false, false);

    let router = fundraising_router(service);
    let response = router
        .oneshot(
            axum::http::Request::get(format!("/api/v1/score/{}/recommendations", id.0))
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let entries = payload.as_array().expect("array payload");
    assert_eq!(entries.len(), 4);
}
