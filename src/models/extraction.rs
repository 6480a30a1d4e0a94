//! Candidate records produced by the extraction model.

use serde::{Deserialize, Serialize};

/// A deduction candidate extracted from free text.
///
/// Field names follow the JSON schema the model is asked to fill, so the
/// model's output deserializes directly into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDeduction {
    /// The plan name as written in the source text.
    pub plan_name: String,
    /// The provider name as written in the source text.
    pub provider_name: String,
    /// The category the model chose; usually one of the canonical labels.
    pub category: String,
    /// The payroll code the model proposed.
    pub suggested_code: String,
}
