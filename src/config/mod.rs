//! Configuration loading and management for the deduction service.
//!
//! This module loads the deduction catalog (categories, plan types, seed
//! deductions and the employee roster) from YAML files, and reads runtime
//! settings from the environment.
//!
//! # Example
//!
//! ```no_run
//! use deduction_admin::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/catalog").unwrap();
//! println!("Loaded {} categories", config.categories().len());
//! ```

mod loader;
mod settings;
mod types;

pub use loader::{ConfigLoader, DEFAULT_PLAN_PLACEHOLDER, DEFAULT_PROVIDER_PLACEHOLDER};
pub use settings::{
    DEFAULT_API_BASE_URL, DEFAULT_BIND, DEFAULT_CATALOG_DIR, DEFAULT_MODEL, ExtractionSettings,
    ServiceSettings,
};
pub use types::{
    CatalogConfig, CategoriesConfig, CategoryDefinition, DeductionsConfig, OfficeAddress,
    PackageEnrollment, RosterConfig, SeedDeduction,
};
