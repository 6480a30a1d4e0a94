//! Configuration types for the deduction catalog.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{ContributionAmount, DeductionCategory, DeductionStatus};

/// A category offered in the quick-build form.
///
/// Defines the plan types available under the category and the example
/// values used as form placeholders.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDefinition {
    /// The category this entry describes.
    pub id: DeductionCategory,
    /// The title shown in the category picker and stored on deductions.
    pub title: String,
    /// A short description of what the category covers.
    pub description: String,
    /// Plan types offered under this category, in display order.
    pub subtypes: Vec<String>,
    /// Placeholder for the provider name field.
    pub example_provider: String,
    /// Placeholder for the plan name field.
    pub example_plan: String,
}

/// Categories configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesConfig {
    /// Category definitions in display order.
    pub categories: Vec<CategoryDefinition>,
}

/// A deduction present when the service starts.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedDeduction {
    /// Unique identifier.
    pub id: String,
    /// The plan name.
    pub plan_name: String,
    /// The provider name.
    pub provider_name: String,
    /// The category the deduction is filed under.
    pub category: DeductionCategory,
    /// The plan type.
    pub subtype: String,
    /// The payroll code.
    pub payroll_code: String,
    /// Initial status.
    pub status: DeductionStatus,
    /// Whether the deduction is pre-tax.
    pub is_pre_tax: bool,
    /// Number of enrolled employees.
    pub employee_count: u32,
}

/// Seed deductions configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct DeductionsConfig {
    /// Deductions in display order (newest first).
    pub deductions: Vec<SeedDeduction>,
}

/// One plan of the standard enrollment package every employee receives.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageEnrollment {
    /// The plan name.
    pub name: String,
    /// The plan type.
    #[serde(rename = "type")]
    pub enrollment_type: String,
    /// Pay frequency.
    pub frequency: String,
    /// Coverage start date.
    pub start_date: NaiveDate,
    /// Amount withheld from the employee.
    pub employee_amount: ContributionAmount,
    /// Amount contributed by the employer.
    pub employer_amount: ContributionAmount,
}

/// Office address shared by the roster.
#[derive(Debug, Clone, Deserialize)]
pub struct OfficeAddress {
    /// Street name appended to the per-employee street number.
    pub street: String,
    /// City.
    pub city: String,
    /// State code.
    pub state: String,
    /// Postal code.
    pub zip: String,
}

/// Employee roster configuration from employees.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Domain used to build work email addresses.
    pub email_domain: String,
    /// Departments assigned round-robin.
    pub departments: Vec<String>,
    /// Hire date recorded for every employee.
    pub hire_date: NaiveDate,
    /// Office address.
    pub office: OfficeAddress,
    /// How many employees are visible before the access list is edited.
    pub initial_visible: usize,
    /// Employee names in id order.
    pub names: Vec<String>,
    /// Plans every employee is enrolled in.
    pub standard_package: Vec<PackageEnrollment>,
}

/// The complete catalog configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    categories: Vec<CategoryDefinition>,
    deductions: Vec<SeedDeduction>,
    roster: RosterConfig,
}

impl CatalogConfig {
    /// Creates a new CatalogConfig from its component parts.
    pub fn new(
        categories: Vec<CategoryDefinition>,
        deductions: Vec<SeedDeduction>,
        roster: RosterConfig,
    ) -> Self {
        Self {
            categories,
            deductions,
            roster,
        }
    }

    /// Returns all category definitions in display order.
    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    /// Returns the seed deductions.
    pub fn deductions(&self) -> &[SeedDeduction] {
        &self.deductions
    }

    /// Returns the roster configuration.
    pub fn roster(&self) -> &RosterConfig {
        &self.roster
    }
}
