//! In-memory storage for deductions.
//!
//! Nothing is persisted; the list is seeded from the catalog at startup and
//! lives for the lifetime of the process.

mod deductions;
mod merge;

pub use deductions::DeductionStore;
pub use merge::{DEFAULT_IMPORT_SUBTYPE, MergeOutcome, candidate_to_deduction, merge_candidates};
