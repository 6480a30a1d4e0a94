//! Core data models for the deduction administration service.
//!
//! This module contains all the domain models used throughout the service.

mod category;
mod deduction;
mod employee;
mod enrollment;
mod extraction;

pub use category::DeductionCategory;
pub use deduction::{Deduction, DeductionStatus};
pub use employee::{Employee, EmployeeDemographics};
pub use enrollment::{ContributionAmount, EnrollmentDetail};
pub use extraction::ExtractedDeduction;
