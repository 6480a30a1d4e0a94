//! Request types for the deduction administration API.
//!
//! Create and update bodies are replayed through a [`DeductionDraft`] so the
//! HTTP surface enforces the same step order and locking as the quick-build
//! flow.

use serde::{Deserialize, Serialize};

use crate::config::ConfigLoader;
use crate::employees::{DualListAction, EmployeeView};
use crate::error::AdminResult;
use crate::quick_build::DeductionDraft;

/// Request body for `POST /deductions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDeductionRequest {
    /// Category id or label (e.g. `MEDICAL` or `Medical`).
    pub category: String,
    /// Plan type offered by the category.
    pub subtype: String,
    /// The provider name.
    pub provider_name: String,
    /// The plan name.
    pub plan_name: String,
    /// Explicit payroll code. Derived from provider and plan when absent.
    #[serde(default)]
    pub payroll_code: Option<String>,
    /// Overrides the category's default tax treatment.
    #[serde(default)]
    pub is_pre_tax: Option<bool>,
}

impl CreateDeductionRequest {
    /// Walks a new draft through category, plan type and details.
    pub fn into_draft(self, config: &ConfigLoader) -> AdminResult<DeductionDraft> {
        let mut draft = DeductionDraft::new();
        let category = config.resolve_category(&self.category)?;
        draft.select_category(category, config)?;
        draft.select_subtype(&self.subtype, config)?;
        draft.set_provider_name(&self.provider_name);
        draft.set_plan_name(&self.plan_name);
        if let Some(code) = self.payroll_code.filter(|c| !c.trim().is_empty()) {
            draft.set_payroll_code(&code)?;
        }
        if let Some(is_pre_tax) = self.is_pre_tax {
            draft.set_pre_tax(is_pre_tax);
        }
        Ok(draft)
    }
}

/// Request body for `PUT /deductions/{id}`.
///
/// Omitted fields keep their current value. Category, subtype and payroll
/// code may be echoed back unchanged but not altered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDeductionRequest {
    /// New plan name.
    #[serde(default)]
    pub plan_name: Option<String>,
    /// New provider name.
    #[serde(default)]
    pub provider_name: Option<String>,
    /// New tax treatment.
    #[serde(default)]
    pub is_pre_tax: Option<bool>,
    /// Current category (locked).
    #[serde(default)]
    pub category: Option<String>,
    /// Current plan type (locked).
    #[serde(default)]
    pub subtype: Option<String>,
    /// Current payroll code (locked).
    #[serde(default)]
    pub payroll_code: Option<String>,
}

impl UpdateDeductionRequest {
    /// Applies the edit to a draft seeded from the stored deduction.
    pub fn apply_to(self, draft: &mut DeductionDraft, config: &ConfigLoader) -> AdminResult<()> {
        if let Some(label) = self.category {
            let category = config.resolve_category(&label)?;
            if draft.category() != Some(category) {
                draft.select_category(category, config)?;
            }
        }
        if let Some(subtype) = self.subtype {
            if draft.subtype() != Some(subtype.as_str()) {
                draft.select_subtype(&subtype, config)?;
            }
        }
        if let Some(code) = self.payroll_code {
            draft.set_payroll_code(&code)?;
        }
        if let Some(provider_name) = self.provider_name {
            draft.set_provider_name(&provider_name);
        }
        if let Some(plan_name) = self.plan_name {
            draft.set_plan_name(&plan_name);
        }
        if let Some(is_pre_tax) = self.is_pre_tax {
            draft.set_pre_tax(is_pre_tax);
        }
        Ok(())
    }
}

/// Request body for `POST /deductions/derive-code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeriveCodeRequest {
    /// The provider name.
    #[serde(default)]
    pub provider_name: String,
    /// The plan name.
    #[serde(default)]
    pub plan_name: String,
}

/// Request body for `POST /deductions/suggest-code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestCodeRequest {
    /// The plan name.
    pub plan_name: String,
    /// The provider name.
    pub provider_name: String,
    /// The category label.
    pub category: String,
}

/// Request body for `POST /deductions/bulk-import`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkImportRequest {
    /// Free text describing one or more plans.
    pub text: String,
}

/// Request body for `PUT /employees/access`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessCommitRequest {
    /// Ids of the employees to make visible.
    pub employee_ids: Vec<String>,
}

/// Request body for `POST /employees/access/preview`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessPreviewRequest {
    /// Starting selection. Defaults to the committed selection.
    #[serde(default)]
    pub selected: Option<Vec<String>>,
    /// Dual-list actions to apply in order.
    #[serde(default)]
    pub actions: Vec<DualListAction>,
}

/// Query string for `GET /deductions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeductionListQuery {
    /// Search text.
    #[serde(default)]
    pub q: String,
}

/// Query string for `GET /employees`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeTableQuery {
    /// Search text.
    #[serde(default)]
    pub q: String,
    /// Which table to return.
    #[serde(default)]
    pub view: EmployeeView,
}

/// Query string for `GET /employees/{id}/history`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    /// The plan name of the enrollment.
    pub plan: String,
}
