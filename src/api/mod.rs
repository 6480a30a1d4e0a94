//! HTTP API for deduction administration.
//!
//! This module provides the REST endpoints for managing payroll
//! deductions, bulk importing them from free text, and browsing employee
//! enrollments.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AccessCommitRequest, AccessPreviewRequest, BulkImportRequest, CreateDeductionRequest,
    DeductionListQuery, DeriveCodeRequest, EmployeeTableQuery, HistoryQuery, SuggestCodeRequest,
    UpdateDeductionRequest,
};
pub use response::{
    AccessListEntry, AccessStateResponse, ApiError, ApiErrorResponse, BulkImportResponse,
    CategoriesResponse, CategoryEntry, CodeResponse, DeductionRow, EnrolledEmployee, EnrolledEmployeesResponse,
    HealthResponse, SYNC_NOTICE, SavedDeduction,
};
pub use state::AppState;
