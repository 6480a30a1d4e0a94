//! The quick-build flow for creating and editing a single deduction.
//!
//! Building a deduction happens in three steps:
//!
//! 1. choose a category (this sets the default tax treatment),
//! 2. choose a plan type offered by that category,
//! 3. fill in provider, plan and payroll code.
//!
//! While the draft is new, the payroll code is derived from the provider
//! and plan names (see [`derive_code`]).

mod code;
mod draft;

pub use code::{CODE_PART_LEN, derive_code};
pub use draft::{DeductionDraft, new_deduction_id};
