//! HTTP request handlers for the deduction administration API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::employees::{DualListSession, build_table, history_snapshot};
use crate::error::AdminError;
use crate::quick_build::{DeductionDraft, derive_code};

use super::request::{
    AccessCommitRequest, AccessPreviewRequest, BulkImportRequest, CreateDeductionRequest,
    DeductionListQuery, DeriveCodeRequest, EmployeeTableQuery, HistoryQuery, SuggestCodeRequest,
    UpdateDeductionRequest,
};
use super::response::{
    AccessStateResponse, ApiError, ApiErrorResponse, BulkImportResponse, CategoriesResponse,
    CodeResponse, DeductionRow, EnrolledEmployee, EnrolledEmployeesResponse, HealthResponse,
    SavedDeduction,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/categories", get(categories_handler))
        .route(
            "/deductions",
            get(list_deductions_handler).post(create_deduction_handler),
        )
        .route("/deductions/derive-code", post(derive_code_handler))
        .route("/deductions/suggest-code", post(suggest_code_handler))
        .route("/deductions/bulk-import", post(bulk_import_handler))
        .route(
            "/deductions/:id",
            get(get_deduction_handler).put(update_deduction_handler),
        )
        .route("/deductions/:id/toggle", post(toggle_deduction_handler))
        .route(
            "/deductions/:id/employees",
            get(deduction_employees_handler),
        )
        .route("/employees", get(employee_table_handler))
        .route(
            "/employees/access",
            get(get_access_handler).put(commit_access_handler),
        )
        .route("/employees/access/preview", post(preview_access_handler))
        .route("/employees/:id/history", get(employee_history_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: AdminError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %error,
        "Request failed"
    );
    let api_error: ApiErrorResponse = error.into();
    json_response(api_error.status, api_error.error)
}

fn json_rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

fn query_rejection_response(rejection: QueryRejection, correlation_id: Uuid) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Query string error"
    );
    json_response(StatusCode::BAD_REQUEST, ApiError::validation_error(body_text))
}

/// Handler for GET /health.
async fn health_handler() -> Response {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}

/// Handler for GET /categories.
async fn categories_handler(State(state): State<AppState>) -> Response {
    json_response(
        StatusCode::OK,
        CategoriesResponse::from_catalog(state.config()),
    )
}

/// Handler for GET /deductions.
///
/// Filters by plan name, provider name or payroll code.
async fn list_deductions_handler(
    State(state): State<AppState>,
    query: Result<Query<DeductionListQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection_response(rejection, correlation_id),
    };

    let deductions = state.store().list(&query.q).await;
    info!(
        correlation_id = %correlation_id,
        query = %query.q,
        results = deductions.len(),
        "Listed deductions"
    );
    let rows: Vec<DeductionRow> = deductions.into_iter().map(DeductionRow::from).collect();
    json_response(StatusCode::OK, rows)
}

/// Handler for POST /deductions.
///
/// Runs the body through a new quick-build draft and stores the result.
async fn create_deduction_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateDeductionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create deduction request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let config = state.config();
    let drafted = request
        .into_draft(config)
        .and_then(|draft| draft.finish(config, Utc::now()));
    let result = match drafted {
        Ok(deduction) => state.store().create(deduction).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(deduction) => {
            info!(
                correlation_id = %correlation_id,
                deduction_id = %deduction.id,
                payroll_code = %deduction.payroll_code,
                "Deduction created"
            );
            json_response(StatusCode::CREATED, SavedDeduction::new(deduction))
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for GET /deductions/{id}.
async fn get_deduction_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().get(&id).await {
        Ok(deduction) => json_response(StatusCode::OK, deduction),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for PUT /deductions/{id}.
///
/// Only the plan name, provider name and tax treatment can change.
async fn update_deduction_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateDeductionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, deduction_id = %id, "Processing update deduction request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let config = state.config();
    let existing = match state.store().get(&id).await {
        Ok(deduction) => deduction,
        Err(err) => return error_response(err, correlation_id),
    };

    let edited = DeductionDraft::for_edit(&existing, config).and_then(|mut draft| {
        request.apply_to(&mut draft, config)?;
        draft.finish(config, Utc::now())
    });
    let result = match edited {
        Ok(deduction) => state.store().update(deduction).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(deduction) => {
            info!(
                correlation_id = %correlation_id,
                deduction_id = %deduction.id,
                "Deduction updated"
            );
            json_response(StatusCode::OK, SavedDeduction::new(deduction))
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /deductions/{id}/toggle.
async fn toggle_deduction_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().toggle_status(&id).await {
        Ok(deduction) => {
            info!(
                correlation_id = %correlation_id,
                deduction_id = %deduction.id,
                status = %deduction.status,
                "Deduction status toggled"
            );
            json_response(StatusCode::OK, deduction)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for GET /deductions/{id}/employees.
async fn deduction_employees_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let deduction = match state.store().get(&id).await {
        Ok(deduction) => deduction,
        Err(err) => return error_response(err, correlation_id),
    };

    let employees: Vec<EnrolledEmployee> = state
        .directory()
        .enrolled_in(&deduction.plan_name)
        .into_iter()
        .map(EnrolledEmployee::from)
        .collect();
    json_response(
        StatusCode::OK,
        EnrolledEmployeesResponse {
            deduction_id: deduction.id,
            plan_name: deduction.plan_name,
            employees,
        },
    )
}

/// Handler for POST /deductions/derive-code.
async fn derive_code_handler(payload: Result<Json<DeriveCodeRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    match payload {
        Ok(Json(request)) => json_response(
            StatusCode::OK,
            CodeResponse {
                payroll_code: derive_code(&request.provider_name, &request.plan_name),
            },
        ),
        Err(rejection) => json_rejection_response(rejection, correlation_id),
    }
}

/// Handler for POST /deductions/suggest-code.
async fn suggest_code_handler(
    State(state): State<AppState>,
    payload: Result<Json<SuggestCodeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    match state
        .extractor()
        .suggest_code(&request.plan_name, &request.provider_name, &request.category)
        .await
    {
        Ok(payroll_code) => {
            info!(
                correlation_id = %correlation_id,
                payroll_code = %payroll_code,
                "Payroll code suggested"
            );
            json_response(StatusCode::OK, CodeResponse { payroll_code })
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /deductions/bulk-import.
///
/// Sends the text to the extraction model and merges the candidates into
/// the deduction list, skipping codes that already exist.
async fn bulk_import_handler(
    State(state): State<AppState>,
    payload: Result<Json<BulkImportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing bulk import request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };
    if request.text.trim().is_empty() {
        return error_response(
            AdminError::InvalidRequest {
                message: "text must not be blank".to_string(),
            },
            correlation_id,
        );
    }

    let start_time = Instant::now();
    let candidates = match state.extractor().extract_deductions(&request.text).await {
        Ok(candidates) => candidates,
        Err(err) => return error_response(err, correlation_id),
    };
    let outcome = state
        .store()
        .merge_extracted(&candidates, state.config(), Utc::now())
        .await;
    let total = state.store().len().await;

    info!(
        correlation_id = %correlation_id,
        extracted = candidates.len(),
        added = outcome.added.len(),
        skipped = outcome.skipped(),
        total,
        duration_ms = start_time.elapsed().as_millis() as u64,
        "Bulk import completed"
    );
    json_response(
        StatusCode::OK,
        BulkImportResponse {
            extracted: candidates.len(),
            outcome,
        },
    )
}

/// Handler for GET /employees.
///
/// Returns the deductions or demographics table for visible employees.
async fn employee_table_handler(
    State(state): State<AppState>,
    query: Result<Query<EmployeeTableQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection_response(rejection, correlation_id),
    };

    let access = state.access().read().await;
    let table = build_table(state.directory(), &access, &query.q, query.view);
    info!(
        correlation_id = %correlation_id,
        view = ?query.view,
        rows = table.len(),
        "Built employee table"
    );
    json_response(StatusCode::OK, table)
}

/// Handler for GET /employees/{id}/history.
async fn employee_history_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection_response(rejection, correlation_id),
    };

    match history_snapshot(state.directory(), &id, &query.plan) {
        Ok(snapshot) => json_response(StatusCode::OK, snapshot),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for GET /employees/access.
async fn get_access_handler(State(state): State<AppState>) -> Response {
    let access = state.access().read().await;
    json_response(
        StatusCode::OK,
        AccessStateResponse::from_session(&access.session(), state.directory()),
    )
}

/// Handler for PUT /employees/access.
///
/// Replaces the set of visible employees.
async fn commit_access_handler(
    State(state): State<AppState>,
    payload: Result<Json<AccessCommitRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let mut access = state.access().write().await;
    match access.commit(request.employee_ids, state.directory()) {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                visible = access.ids().len(),
                "Employee access updated"
            );
            json_response(
                StatusCode::OK,
                AccessStateResponse::from_session(&access.session(), state.directory()),
            )
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /employees/access/preview.
///
/// Applies dual-list actions to a working copy without committing it.
async fn preview_access_handler(
    State(state): State<AppState>,
    payload: Result<Json<AccessPreviewRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let directory = state.directory();
    let mut session = match request.selected {
        Some(ids) => {
            if let Some(unknown) = ids.iter().find(|id| !directory.contains(id)) {
                return error_response(
                    AdminError::EmployeeNotFound {
                        id: unknown.clone(),
                    },
                    correlation_id,
                );
            }
            DualListSession::new(ids)
        }
        None => state.access().read().await.session(),
    };
    for action in &request.actions {
        session.apply(action, directory);
    }

    json_response(
        StatusCode::OK,
        AccessStateResponse::from_session(&session, directory),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::config::ConfigLoader;
    use crate::error::AdminResult;
    use crate::extraction::DeductionExtractor;
    use crate::models::ExtractedDeduction;

    struct NoModel;

    #[async_trait]
    impl DeductionExtractor for NoModel {
        async fn extract_deductions(&self, _text: &str) -> AdminResult<Vec<ExtractedDeduction>> {
            Err(AdminError::ExtractionUnavailable {
                message: "no API key configured".to_string(),
            })
        }

        async fn suggest_code(&self, _: &str, _: &str, _: &str) -> AdminResult<String> {
            Err(AdminError::ExtractionUnavailable {
                message: "no API key configured".to_string(),
            })
        }
    }

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/catalog").expect("Failed to load config");
        AppState::new(config, Arc::new(NoModel)).expect("Failed to build state")
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_201_with_sync_notice() {
        let router = create_router(create_test_state());

        let body = r#"{
            "category": "Dental",
            "subtype": "Dental PPO",
            "provider_name": "MetLife",
            "plan_name": "Dental Advantage Premier"
        }"#;
        let response = router.oneshot(post_json("/deductions", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let saved: SavedDeduction = serde_json::from_slice(&body).unwrap();
        assert_eq!(saved.deduction.payroll_code, "METL-DENT");
        assert_eq!(saved.deduction.employee_count, 0);
        assert!(!saved.sync_notice.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/deductions", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/deductions", r#"{"category": "Dental"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("missing field"));
    }

    #[tokio::test]
    async fn test_bulk_import_without_model_returns_503() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json(
                "/deductions/bulk-import",
                r#"{"text": "Kaiser Gold HMO"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_blank_bulk_text_is_rejected_before_the_model() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/deductions/bulk-import", r#"{"text": "   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_toggle_unknown_deduction_returns_404() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/deductions/missing/toggle", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_filters_by_code() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/deductions?q=ret-fid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let rows: Vec<DeductionRow> = serde_json::from_slice(&body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].deduction.payroll_code, "RET-FID-01");
        assert_eq!(rows[0].tax_treatment, "Pre-Tax");
    }
}
