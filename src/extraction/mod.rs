//! Bulk import through an external generative model.
//!
//! Pasted free text goes to the model, which returns candidate deduction
//! records. Classification and code generation happen entirely on the
//! model side; this module only builds the request and reads the reply.

mod gemini;
mod prompt;

use async_trait::async_trait;

use crate::error::AdminResult;
use crate::models::ExtractedDeduction;

pub use gemini::{GeminiExtractor, parse_candidates};
pub use prompt::{candidates_schema, code_prompt, extraction_prompt};

/// Turns free text into deduction candidates.
#[async_trait]
pub trait DeductionExtractor: Send + Sync {
    /// Extracts candidate deductions from `text`.
    ///
    /// A reply that cannot be read as candidates yields an empty list;
    /// transport failures are errors.
    async fn extract_deductions(&self, text: &str) -> AdminResult<Vec<ExtractedDeduction>>;

    /// Asks for a payroll code for one plan.
    async fn suggest_code(
        &self,
        plan_name: &str,
        provider_name: &str,
        category: &str,
    ) -> AdminResult<String>;
}
