//! Payroll deduction administration service.
//!
//! This crate manages the catalog of payroll deductions an HR administrator
//! offers (medical, dental, retirement, garnishments and so on), builds new
//! deductions through a guided quick-build flow, bulk imports plans from
//! free text through a generative model, and exposes read-only views of
//! employee enrollments.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod employees;
pub mod error;
pub mod extraction;
pub mod models;
pub mod quick_build;
pub mod store;
