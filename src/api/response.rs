//! Response types for the deduction administration API.
//!
//! This module defines the success bodies returned by the handlers, the
//! error response structure, and the mapping from [`AdminError`] to HTTP
//! status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::config::{CategoryDefinition, ConfigLoader};
use crate::employees::{DualListSession, EmployeeDirectory};
use crate::error::AdminError;
use crate::models::{Deduction, DeductionCategory, Employee};
use crate::store::MergeOutcome;

/// Message attached to every successful save.
pub const SYNC_NOTICE: &str = "Your deduction was saved and will sync to payroll. \
     Remember to map it in your benefits administration system.";

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<AdminError> for ApiErrorResponse {
    fn from(error: AdminError) -> Self {
        let message = error.to_string();
        match error {
            AdminError::ConfigNotFound { .. } | AdminError::ConfigParseError { .. } => {
                ApiErrorResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                )
            }
            AdminError::UnknownCategory { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("UNKNOWN_CATEGORY", message),
            ),
            AdminError::UnknownSubtype { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("UNKNOWN_SUBTYPE", message),
            ),
            AdminError::DeductionNotFound { .. } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new("DEDUCTION_NOT_FOUND", message),
            ),
            AdminError::DuplicatePayrollCode { .. } => ApiErrorResponse::new(
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "DUPLICATE_PAYROLL_CODE",
                    message,
                    "Please use a unique code.",
                ),
            ),
            AdminError::InvalidDeduction { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_DEDUCTION", message),
            ),
            AdminError::EmployeeNotFound { .. } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            AdminError::EnrollmentNotFound { .. } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new("ENROLLMENT_NOT_FOUND", message),
            ),
            AdminError::InvalidRequest { .. } => {
                ApiErrorResponse::new(StatusCode::BAD_REQUEST, ApiError::validation_error(message))
            }
            AdminError::ExtractionUnavailable { .. } => ApiErrorResponse::new(
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::new("EXTRACTION_UNAVAILABLE", message),
            ),
            AdminError::ExtractionFailed { .. } => ApiErrorResponse::new(
                StatusCode::BAD_GATEWAY,
                ApiError::new("EXTRACTION_FAILED", message),
            ),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok`.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// One category as offered by the quick-build form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntry {
    /// Category id.
    pub id: DeductionCategory,
    /// Display title.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Plan types.
    pub subtypes: Vec<String>,
    /// Whether new deductions in this category default to pre-tax.
    pub default_pre_tax: bool,
    /// Provider name placeholder.
    pub provider_placeholder: String,
    /// Plan name placeholder.
    pub plan_placeholder: String,
}

impl From<&CategoryDefinition> for CategoryEntry {
    fn from(definition: &CategoryDefinition) -> Self {
        Self {
            id: definition.id,
            title: definition.title.clone(),
            description: definition.description.clone(),
            subtypes: definition.subtypes.clone(),
            default_pre_tax: definition.id.default_pre_tax(),
            provider_placeholder: definition.example_provider.clone(),
            plan_placeholder: definition.example_plan.clone(),
        }
    }
}

/// Body of `GET /categories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    /// Categories in display order.
    pub categories: Vec<CategoryEntry>,
    /// Provider placeholder before a category is chosen.
    pub provider_placeholder: String,
    /// Plan placeholder before a category is chosen.
    pub plan_placeholder: String,
}

impl CategoriesResponse {
    /// Builds the response from the loaded catalog.
    pub fn from_catalog(config: &ConfigLoader) -> Self {
        let (provider_placeholder, plan_placeholder) = config.placeholders(None);
        Self {
            categories: config.categories().iter().map(CategoryEntry::from).collect(),
            provider_placeholder: provider_placeholder.to_string(),
            plan_placeholder: plan_placeholder.to_string(),
        }
    }
}

/// Body returned after a create or update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedDeduction {
    /// The stored deduction.
    pub deduction: Deduction,
    /// Payroll sync message for the banner.
    pub sync_notice: String,
}

impl SavedDeduction {
    /// Wraps a saved deduction with the sync notice.
    pub fn new(deduction: Deduction) -> Self {
        Self {
            deduction,
            sync_notice: SYNC_NOTICE.to_string(),
        }
    }
}

/// One row of the deduction list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionRow {
    /// The stored deduction.
    #[serde(flatten)]
    pub deduction: Deduction,
    /// `Pre-Tax` or `Post-Tax`.
    pub tax_treatment: String,
}

impl From<Deduction> for DeductionRow {
    fn from(deduction: Deduction) -> Self {
        let tax_treatment = deduction.tax_treatment().to_string();
        Self {
            deduction,
            tax_treatment,
        }
    }
}

/// Body of the code derivation and suggestion endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeResponse {
    /// The payroll code.
    pub payroll_code: String,
}

/// Body of `POST /deductions/bulk-import`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkImportResponse {
    /// Number of candidates the model returned.
    pub extracted: usize,
    /// What was added and skipped.
    #[serde(flatten)]
    pub outcome: MergeOutcome,
}

/// An employee enrolled in a deduction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrolledEmployee {
    /// Employee id.
    pub id: String,
    /// Employee name.
    pub name: String,
    /// Department.
    pub department: String,
}

impl From<&Employee> for EnrolledEmployee {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.clone(),
            name: employee.name.clone(),
            department: employee.demographics.department.clone(),
        }
    }
}

/// Body of `GET /deductions/{id}/employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrolledEmployeesResponse {
    /// The deduction id.
    pub deduction_id: String,
    /// The deduction's plan name.
    pub plan_name: String,
    /// Employees holding an enrollment in the plan.
    pub employees: Vec<EnrolledEmployee>,
}

/// A side of the dual list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessListEntry {
    /// Employee id.
    pub id: String,
    /// Employee name.
    pub name: String,
    /// Whether the entry is highlighted.
    pub highlighted: bool,
}

/// Body of the access endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessStateResponse {
    /// Current search text on the available side.
    pub search: String,
    /// Unselected employees matching the search.
    pub available: Vec<AccessListEntry>,
    /// Selected employees.
    pub selected: Vec<AccessListEntry>,
}

impl AccessStateResponse {
    /// Renders a session against the directory.
    pub fn from_session(session: &DualListSession, directory: &EmployeeDirectory) -> Self {
        let entry = |id: &str, highlighted: bool| AccessListEntry {
            id: id.to_string(),
            name: directory
                .get(id)
                .map(|e| e.name.clone())
                .unwrap_or_default(),
            highlighted,
        };
        Self {
            search: session.search().to_string(),
            available: session
                .available(directory)
                .into_iter()
                .map(|id| entry(id, session.highlighted_available().contains(id)))
                .collect(),
            selected: session
                .selected(directory)
                .into_iter()
                .map(|id| entry(id, session.highlighted_selected().contains(id)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_deduction_row_flattens_with_tax_label() {
        let config = ConfigLoader::load("./config/catalog").expect("Failed to load config");
        let seed = &config.config().deductions()[1];
        let row = DeductionRow::from(Deduction {
            id: seed.id.clone(),
            plan_name: seed.plan_name.clone(),
            provider_name: seed.provider_name.clone(),
            category: "Retirement Contribution".to_string(),
            subtype: seed.subtype.clone(),
            payroll_code: seed.payroll_code.clone(),
            status: seed.status,
            is_pre_tax: false,
            created_at: chrono::Utc::now(),
            employee_count: seed.employee_count,
        });

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["payroll_code"], seed.payroll_code.as_str());
        assert_eq!(json["tax_treatment"], "Post-Tax");
        assert!(json.get("deduction").is_none());
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AdminError::DeductionNotFound { id: "x".into() },
                StatusCode::NOT_FOUND,
                "DEDUCTION_NOT_FOUND",
            ),
            (
                AdminError::DuplicatePayrollCode { code: "X".into() },
                StatusCode::CONFLICT,
                "DUPLICATE_PAYROLL_CODE",
            ),
            (
                AdminError::InvalidRequest { message: "blank".into() },
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                AdminError::ExtractionUnavailable { message: "no key".into() },
                StatusCode::SERVICE_UNAVAILABLE,
                "EXTRACTION_UNAVAILABLE",
            ),
            (
                AdminError::ExtractionFailed { message: "500".into() },
                StatusCode::BAD_GATEWAY,
                "EXTRACTION_FAILED",
            ),
            (
                AdminError::ConfigNotFound { path: "x".into() },
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
            ),
        ];
        for (error, status, code) in cases {
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.status, status);
            assert_eq!(response.error.code, code);
        }
    }

    #[test]
    fn test_duplicate_code_message_names_the_code() {
        let response: ApiErrorResponse = AdminError::DuplicatePayrollCode {
            code: "MED-BCBS-01".into(),
        }
        .into();
        assert!(response.error.message.contains("\"MED-BCBS-01\""));
        assert_eq!(response.error.details.as_deref(), Some("Please use a unique code."));
    }

    #[test]
    fn test_bulk_import_response_flattens_outcome() {
        let response = BulkImportResponse {
            extracted: 0,
            outcome: MergeOutcome {
                added: vec![],
                skipped_codes: vec![],
                missing_codes: vec![],
                notice: None,
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["extracted"], 0);
        assert!(json["added"].as_array().unwrap().is_empty());
        assert!(json.get("notice").is_none());
    }
}
