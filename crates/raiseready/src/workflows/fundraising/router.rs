use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde_json::json;

use super::domain::CompanyId;
use super::repository::{AuditSink, CompanyStore, DocumentStore, NotificationSink, StoreError};
use super::service::{FundraisingService, FundraisingServiceError, NewCompany, NewDocument};
use super::trigger::CompanyChange;

/// Router builder exposing the onboarding, mutation, and scoring endpoints.
pub fn fundraising_router<C, D, N, A>(
    service: Arc<FundraisingService<C, D, N, A>>,
) -> Router
where
    C: CompanyStore + 'static,
    D: DocumentStore + 'static,
    N: NotificationSink + 'static,
    A: AuditSink + 'static,
{
    Router::new()
        .route("/api/v1/companies", post(onboard_handler::<C, D, N, A>))
        .route(
            "/api/v1/companies/:company_id/kyc/verify",
            post(verify_kyc_handler::<C, D, N, A>),
        )
        .route(
            "/api/v1/companies/:company_id/financials/link",
            post(link_financials_handler::<C, D, N, A>),
        )
        .route(
            "/api/v1/companies/:company_id/financials/unlink",
            post(unlink_financials_handler::<C, D, N, A>),
        )
        .route(
            "/api/v1/companies/:company_id/documents",
            post(add_document_handler::<C, D, N, A>),
        )
        .route(
            "/api/v1/companies/:company_id/documents/:document_id",
            delete(remove_document_handler::<C, D, N, A>),
        )
        .route(
            "/api/v1/score/:company_id",
            get(score_handler::<C, D, N, A>),
        )
        .route(
            "/api/v1/score/:company_id/recommendations",
            get(recommendations_handler::<C, D, N, A>),
        )
        .route(
            "/api/v1/score/:company_id/recalculate",
            post(recalculate_handler::<C, D, N, A>),
        )
        .with_state(service)
}

fn error_response(error: FundraisingServiceError) -> Response {
    let status = match &error {
        FundraisingServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        FundraisingServiceError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        FundraisingServiceError::AlreadyDone(_) => StatusCode::BAD_REQUEST,
        FundraisingServiceError::InvalidProfile(_)
        | FundraisingServiceError::InvalidDocument(_) => StatusCode::UNPROCESSABLE_ENTITY,
        FundraisingServiceError::Store(StoreError::Unavailable(_))
        | FundraisingServiceError::Notify(_)
        | FundraisingServiceError::Audit(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn onboard_handler<C, D, N, A>(
    State(service): State<Arc<FundraisingService<C, D, N, A>>>,
    axum::Json(payload): axum::Json<NewCompany>,
) -> Response
where
    C: CompanyStore + 'static,
    D: DocumentStore + 'static,
    N: NotificationSink + 'static,
    A: AuditSink + 'static,
{
    match service.onboard_company(payload) {
        Ok(company) => (StatusCode::CREATED, axum::Json(company)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn verify_kyc_handler<C, D, N, A>(
    State(service): State<Arc<FundraisingService<C, D, N, A>>>,
    Path(company_id): Path<String>,
) -> Response
where
    C: CompanyStore + 'static,
    D: DocumentStore + 'static,
    N: NotificationSink + 'static,
    A: AuditSink + 'static,
{
    match service.verify_kyc(&CompanyId(company_id)) {
        Ok(company) => (StatusCode::OK, axum::Json(company)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn link_financials_handler<C, D, N, A>(
    State(service): State<Arc<FundraisingService<C, D, N, A>>>,
    Path(company_id): Path<String>,
) -> Response
where
    C: CompanyStore + 'static,
    D: DocumentStore + 'static,
    N: NotificationSink + 'static,
    A: AuditSink + 'static,
{
    match service.link_financials(&CompanyId(company_id)) {
        Ok(company) => (StatusCode::OK, axum::Json(company)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn unlink_financials_handler<C, D, N, A>(
    State(service): State<Arc<FundraisingService<C, D, N, A>>>,
    Path(company_id): Path<String>,
) -> Response
where
    C: CompanyStore + 'static,
    D: DocumentStore + 'static,
    N: NotificationSink + 'static,
    A: AuditSink + 'static,
{
    match service.unlink_financials(&CompanyId(company_id)) {
        Ok(company) => (StatusCode::OK, axum::Json(company)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn add_document_handler<C, D, N, A>(
    State(service): State<Arc<FundraisingService<C, D, N, A>>>,
    Path(company_id): Path<String>,
    axum::Json(payload): axum::Json<NewDocument>,
) -> Response
where
    C: CompanyStore + 'static,
    D: DocumentStore + 'static,
    N: NotificationSink + 'static,
    A: AuditSink + 'static,
{
    match service.add_document(&CompanyId(company_id), payload) {
        Ok(document) => (StatusCode::CREATED, axum::Json(document)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn remove_document_handler<C, D, N, A>(
    State(service): State<Arc<FundraisingService<C, D, N, A>>>,
    Path((company_id, document_id)): Path<(String, String)>,
) -> Response
where
    C: CompanyStore + 'static,
    D: DocumentStore + 'static,
    N: NotificationSink + 'static,
    A: AuditSink + 'static,
{
    match service.remove_document(&CompanyId(company_id), &document_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<C, D, N, A>(
    State(service): State<Arc<FundraisingService<C, D, N, A>>>,
    Path(company_id): Path<String>,
) -> Response
where
    C: CompanyStore + 'static,
    D: DocumentStore + 'static,
    N: NotificationSink + 'static,
    A: AuditSink + 'static,
{
    match service.calculate_score(&CompanyId(company_id)) {
        Ok(score) => (StatusCode::OK, axum::Json(score)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recommendations_handler<C, D, N, A>(
    State(service): State<Arc<FundraisingService<C, D, N, A>>>,
    Path(company_id): Path<String>,
) -> Response
where
    C: CompanyStore + 'static,
    D: DocumentStore + 'static,
    N: NotificationSink + 'static,
    A: AuditSink + 'static,
{
    match service.recommendations(&CompanyId(company_id)) {
        Ok(checklist) => (StatusCode::OK, axum::Json(checklist)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recalculate_handler<C, D, N, A>(
    State(service): State<Arc<FundraisingService<C, D, N, A>>>,
    Path(company_id): Path<String>,
) -> Response
where
    C: CompanyStore + 'static,
    D: DocumentStore + 'static,
    N: NotificationSink + 'static,
    A: AuditSink + 'static,
{
    let id = CompanyId(company_id);
    if let Err(error) = service.on_company_data_change(&id, CompanyChange::Manual) {
        return error_response(error);
    }

    match service.calculate_score(&id) {
        Ok(score) => (StatusCode::OK, axum::Json(score)).into_response(),
        Err(error) => error_response(error),
    }
}
