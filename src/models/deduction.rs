//! Deduction model and related types.
//!
//! This module defines the Deduction struct and DeductionStatus enum
//! for representing payroll withholding plans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The lifecycle status of a deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionStatus {
    /// The deduction is withheld from pay.
    Active,
    /// The deduction exists but is not withheld.
    Inactive,
    /// The deduction is awaiting activation.
    Pending,
}

impl DeductionStatus {
    /// Returns the status after flipping the toggle switch.
    ///
    /// Only an active deduction becomes inactive; anything else is activated.
    ///
    /// # Examples
    ///
    /// ```
    /// use deduction_admin::models::DeductionStatus;
    ///
    /// assert_eq!(DeductionStatus::Active.toggled(), DeductionStatus::Inactive);
    /// assert_eq!(DeductionStatus::Pending.toggled(), DeductionStatus::Active);
    /// ```
    pub fn toggled(self) -> Self {
        match self {
            DeductionStatus::Active => DeductionStatus::Inactive,
            DeductionStatus::Inactive | DeductionStatus::Pending => DeductionStatus::Active,
        }
    }
}

impl std::fmt::Display for DeductionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeductionStatus::Active => write!(f, "Active"),
            DeductionStatus::Inactive => write!(f, "Inactive"),
            DeductionStatus::Pending => write!(f, "Pending"),
        }
    }
}

/// A named payroll withholding plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deduction {
    /// Unique identifier for the deduction.
    pub id: String,
    /// The plan name (e.g., "Basic PPO").
    pub plan_name: String,
    /// The provider administering the plan (e.g., "Fidelity").
    pub provider_name: String,
    /// The category label the deduction was filed under.
    pub category: String,
    /// The plan type within the category (e.g., "PPO Plan").
    pub subtype: String,
    /// The payroll code; unique across all deductions.
    pub payroll_code: String,
    /// Whether the deduction is currently withheld.
    pub status: DeductionStatus,
    /// Whether the deduction is taken before tax.
    pub is_pre_tax: bool,
    /// When the deduction was created.
    pub created_at: DateTime<Utc>,
    /// Number of employees enrolled in the plan.
    #[serde(default)]
    pub employee_count: u32,
}

impl Deduction {
    /// Returns the tax treatment label shown in the deductions table.
    pub fn tax_treatment(&self) -> &'static str {
        if self.is_pre_tax { "Pre-Tax" } else { "Post-Tax" }
    }

    /// Returns true if the plan name, provider name or payroll code
    /// contains `query`, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use deduction_admin::models::{Deduction, DeductionStatus};
    /// use chrono::Utc;
    ///
    /// let deduction = Deduction {
    ///     id: "1".to_string(),
    ///     plan_name: "Basic PPO".to_string(),
    ///     provider_name: "BlueCross BlueShield".to_string(),
    ///     category: "Medical".to_string(),
    ///     subtype: "PPO Plan".to_string(),
    ///     payroll_code: "MED-BCBS-01".to_string(),
    ///     status: DeductionStatus::Active,
    ///     is_pre_tax: true,
    ///     created_at: Utc::now(),
    ///     employee_count: 13,
    /// };
    /// assert!(deduction.matches_query("bcbs"));
    /// assert!(deduction.matches_query("bluecross"));
    /// assert!(!deduction.matches_query("dental"));
    /// ```
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.plan_name.to_lowercase().contains(&query)
            || self.provider_name.to_lowercase().contains(&query)
            || self.payroll_code.to_lowercase().contains(&query)
    }
}
