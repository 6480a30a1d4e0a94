//! Quick-build draft state.
//!
//! A [`DeductionDraft`] walks through the three steps of building a
//! deduction: pick a category, pick a plan type, then fill in the details.
//! Drafts seeded from an existing deduction lock the category, plan type
//! and payroll code.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::error::{AdminError, AdminResult};
use crate::models::{Deduction, DeductionCategory, DeductionStatus};

use super::code::derive_code;

/// In-progress state of the quick-build form.
#[derive(Debug, Clone, PartialEq)]
pub struct DeductionDraft {
    original: Option<Deduction>,
    category: Option<DeductionCategory>,
    subtype: Option<String>,
    plan_name: String,
    provider_name: String,
    payroll_code: String,
    is_pre_tax: bool,
}

impl Default for DeductionDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl DeductionDraft {
    /// Starts an empty draft for a new deduction.
    pub fn new() -> Self {
        Self {
            original: None,
            category: None,
            subtype: None,
            plan_name: String::new(),
            provider_name: String::new(),
            payroll_code: String::new(),
            is_pre_tax: true,
        }
    }

    /// Starts a draft that edits `deduction`.
    ///
    /// Fails with `UnknownCategory` if the deduction's category label no
    /// longer matches the catalog.
    pub fn for_edit(deduction: &Deduction, config: &ConfigLoader) -> AdminResult<Self> {
        let category = config.resolve_category(&deduction.category)?;
        Ok(Self {
            original: Some(deduction.clone()),
            category: Some(category),
            subtype: Some(deduction.subtype.clone()),
            plan_name: deduction.plan_name.clone(),
            provider_name: deduction.provider_name.clone(),
            payroll_code: deduction.payroll_code.clone(),
            is_pre_tax: deduction.is_pre_tax,
        })
    }

    /// Returns true if this draft edits an existing deduction.
    pub fn is_edit(&self) -> bool {
        self.original.is_some()
    }

    /// Step 1: choose the category.
    ///
    /// Clears the plan type and resets the pre-tax flag to the category's
    /// default.
    pub fn select_category(
        &mut self,
        category: DeductionCategory,
        config: &ConfigLoader,
    ) -> AdminResult<()> {
        self.ensure_unlocked("category")?;
        config.get_category(category)?;
        self.category = Some(category);
        self.subtype = None;
        self.is_pre_tax = category.default_pre_tax();
        Ok(())
    }

    /// Step 2: choose the plan type offered by the selected category.
    pub fn select_subtype(&mut self, subtype: &str, config: &ConfigLoader) -> AdminResult<()> {
        self.ensure_unlocked("subtype")?;
        let category = self.category.ok_or_else(|| AdminError::InvalidDeduction {
            field: "subtype".to_string(),
            message: "choose a category first".to_string(),
        })?;
        config.validate_subtype(category, subtype)?;
        self.subtype = Some(subtype.to_string());
        Ok(())
    }

    /// Step 3: set the provider name.
    pub fn set_provider_name(&mut self, provider_name: &str) {
        self.provider_name = provider_name.to_string();
        self.refresh_code();
    }

    /// Step 3: set the plan name.
    pub fn set_plan_name(&mut self, plan_name: &str) {
        self.plan_name = plan_name.to_string();
        self.refresh_code();
    }

    /// Step 3: type a payroll code. Codes are always upper-case.
    pub fn set_payroll_code(&mut self, payroll_code: &str) -> AdminResult<()> {
        let code = payroll_code.trim().to_uppercase();
        if self.is_edit() && code != self.payroll_code {
            return Err(Self::locked("payroll_code"));
        }
        self.payroll_code = code;
        Ok(())
    }

    /// Step 3: set whether the deduction is pre-tax.
    pub fn set_pre_tax(&mut self, is_pre_tax: bool) {
        self.is_pre_tax = is_pre_tax;
    }

    /// Flips the pre-tax switch.
    pub fn toggle_pre_tax(&mut self) {
        self.is_pre_tax = !self.is_pre_tax;
    }

    /// Auto-derives the payroll code for new drafts.
    ///
    /// A code that already contains `-` was either completed by derivation
    /// or typed by the user and is kept.
    fn refresh_code(&mut self) {
        if self.is_edit() || self.payroll_code.contains('-') {
            return;
        }
        if self.provider_name.is_empty() && self.plan_name.is_empty() {
            return;
        }
        let code = derive_code(&self.provider_name, &self.plan_name);
        if !code.is_empty() {
            self.payroll_code = code;
        }
    }

    /// Returns the selected category.
    pub fn category(&self) -> Option<DeductionCategory> {
        self.category
    }

    /// Returns the selected plan type.
    pub fn subtype(&self) -> Option<&str> {
        self.subtype.as_deref()
    }

    /// Returns the current payroll code.
    pub fn payroll_code(&self) -> &str {
        &self.payroll_code
    }

    /// Returns the current pre-tax flag.
    pub fn is_pre_tax(&self) -> bool {
        self.is_pre_tax
    }

    /// Returns true once every required field is filled in.
    pub fn is_ready(&self) -> bool {
        self.missing_field().is_none()
    }

    fn missing_field(&self) -> Option<&'static str> {
        if self.category.is_none() {
            Some("category")
        } else if self.subtype.is_none() {
            Some("subtype")
        } else if self.plan_name.trim().is_empty() {
            Some("plan_name")
        } else if self.provider_name.trim().is_empty() {
            Some("provider_name")
        } else if self.payroll_code.is_empty() {
            Some("payroll_code")
        } else {
            None
        }
    }

    /// Builds the deduction described by the draft.
    ///
    /// New drafts get a fresh id, `Active` status and the given creation
    /// time; edit drafts keep the original id, status and creation time.
    /// Either way the enrolled-employee count starts at zero.
    pub fn finish(&self, config: &ConfigLoader, now: DateTime<Utc>) -> AdminResult<Deduction> {
        if let Some(field) = self.missing_field() {
            return Err(AdminError::InvalidDeduction {
                field: field.to_string(),
                message: "is required".to_string(),
            });
        }
        let (Some(category), Some(subtype)) = (self.category, self.subtype.clone()) else {
            return Err(AdminError::InvalidDeduction {
                field: "category".to_string(),
                message: "is required".to_string(),
            });
        };
        let title = config.get_category(category)?.title.clone();

        let (id, status, created_at) = match &self.original {
            Some(original) => (original.id.clone(), original.status, original.created_at),
            None => (new_deduction_id(), DeductionStatus::Active, now),
        };

        Ok(Deduction {
            id,
            plan_name: self.plan_name.trim().to_string(),
            provider_name: self.provider_name.trim().to_string(),
            category: title,
            subtype,
            payroll_code: self.payroll_code.clone(),
            status,
            is_pre_tax: self.is_pre_tax,
            created_at,
            employee_count: 0,
        })
    }

    fn ensure_unlocked(&self, field: &str) -> AdminResult<()> {
        if self.is_edit() {
            Err(Self::locked(field))
        } else {
            Ok(())
        }
    }

    fn locked(field: &str) -> AdminError {
        AdminError::InvalidDeduction {
            field: field.to_string(),
            message: "cannot be changed after the deduction is created".to_string(),
        }
    }
}

/// Generates an id for a new deduction.
pub fn new_deduction_id() -> String {
    Uuid::new_v4().simple().to_string()
}
