//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the deduction
//! catalog and seed data from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{AdminError, AdminResult};
use crate::models::DeductionCategory;

use super::types::{
    CatalogConfig, CategoriesConfig, CategoryDefinition, DeductionsConfig, RosterConfig,
};

/// Placeholder for the provider field when a category has none.
pub const DEFAULT_PROVIDER_PLACEHOLDER: &str = "e.g. Insurance Provider Name";

/// Placeholder for the plan field when a category has none.
pub const DEFAULT_PLAN_PLACEHOLDER: &str = "e.g. Standard Advantage Plan";

/// Loads and provides access to the deduction catalog.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query categories and their plan types.
///
/// # Directory Structure
///
/// ```text
/// config/catalog/
/// ├── categories.yaml   # Categories, plan types and form placeholders
/// ├── deductions.yaml   # Deductions present at startup
/// └── employees.yaml    # Employee roster and standard enrollment package
/// ```
///
/// # Example
///
/// ```no_run
/// use deduction_admin::config::ConfigLoader;
/// use deduction_admin::models::DeductionCategory;
///
/// let loader = ConfigLoader::load("./config/catalog").unwrap();
/// let medical = loader.get_category(DeductionCategory::Medical).unwrap();
/// println!("Plan types: {:?}", medical.subtypes);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: CatalogConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A category is listed twice or a category has no plan types
    /// - Two seed deductions share a payroll code
    pub fn load<P: AsRef<Path>>(path: P) -> AdminResult<Self> {
        let path = path.as_ref();

        let categories_path = path.join("categories.yaml");
        let categories = Self::load_yaml::<CategoriesConfig>(&categories_path)?.categories;
        Self::validate_categories(&categories, &categories_path)?;

        let deductions_path = path.join("deductions.yaml");
        let deductions = Self::load_yaml::<DeductionsConfig>(&deductions_path)?.deductions;
        let mut codes = HashSet::new();
        for seed in &deductions {
            if !codes.insert(seed.payroll_code.as_str()) {
                return Err(AdminError::ConfigParseError {
                    path: deductions_path.display().to_string(),
                    message: format!("duplicate payroll code '{}'", seed.payroll_code),
                });
            }
        }

        let roster_path = path.join("employees.yaml");
        let roster = Self::load_yaml::<RosterConfig>(&roster_path)?;
        if roster.departments.is_empty() {
            return Err(AdminError::ConfigParseError {
                path: roster_path.display().to_string(),
                message: "at least one department is required".to_string(),
            });
        }

        Ok(Self {
            config: CatalogConfig::new(categories, deductions, roster),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> AdminResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| AdminError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| AdminError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_categories(categories: &[CategoryDefinition], path: &Path) -> AdminResult<()> {
        let mut seen = HashSet::new();
        for definition in categories {
            if !seen.insert(definition.id) {
                return Err(AdminError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("category {} is listed more than once", definition.id.id()),
                });
            }
            if definition.subtypes.is_empty() {
                return Err(AdminError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("category {} has no plan types", definition.id.id()),
                });
            }
        }
        Ok(())
    }

    /// Returns the underlying catalog configuration.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Returns all category definitions in display order.
    pub fn categories(&self) -> &[CategoryDefinition] {
        self.config.categories()
    }

    /// Gets a category definition.
    ///
    /// # Returns
    ///
    /// Returns the definition if the catalog offers it, or `UnknownCategory`.
    pub fn get_category(&self, category: DeductionCategory) -> AdminResult<&CategoryDefinition> {
        self.config
            .categories()
            .iter()
            .find(|c| c.id == category)
            .ok_or_else(|| AdminError::UnknownCategory {
                category: category.id().to_string(),
            })
    }

    /// Resolves a category from its catalog title, id, or canonical label.
    ///
    /// Deductions store the title they were filed under, which for some
    /// categories differs from the label used by the extraction model.
    pub fn resolve_category(&self, label: &str) -> AdminResult<DeductionCategory> {
        let needle = label.trim();
        self.config
            .categories()
            .iter()
            .find(|c| c.title.eq_ignore_ascii_case(needle))
            .map(|c| Ok(c.id))
            .unwrap_or_else(|| needle.parse())
    }

    /// Checks that `subtype` is one of the plan types of `category`.
    pub fn validate_subtype(&self, category: DeductionCategory, subtype: &str) -> AdminResult<()> {
        let definition = self.get_category(category)?;
        if definition.subtypes.iter().any(|s| s == subtype) {
            Ok(())
        } else {
            Err(AdminError::UnknownSubtype {
                category: category.id().to_string(),
                subtype: subtype.to_string(),
            })
        }
    }

    /// Returns the `(provider, plan)` placeholders for the quick-build form.
    ///
    /// Without a category the generic placeholders are returned.
    pub fn placeholders(&self, category: Option<DeductionCategory>) -> (&str, &str) {
        category
            .and_then(|c| self.get_category(c).ok())
            .map(|d| (d.example_provider.as_str(), d.example_plan.as_str()))
            .unwrap_or((DEFAULT_PROVIDER_PLACEHOLDER, DEFAULT_PLAN_PLACEHOLDER))
    }
}
