//! Prompts and response schema sent to the extraction model.

use serde_json::{Value, json};

use crate::models::DeductionCategory;

/// Builds the prompt asking the model to extract deduction plans.
pub fn extraction_prompt(raw_text: &str) -> String {
    let labels: Vec<&str> = DeductionCategory::ALL.iter().map(|c| c.label()).collect();
    format!(
        "Parse the following text into a list of payroll deduction plans. \
         Extract Plan Name, Provider Name, and Category.\n\
         Text: {}\n\n\
         Valid Categories are: {}.\n\
         Map the extracted data to these categories accurately.\n\
         Also, generate a unique payroll code for each.",
        raw_text,
        labels.join(", ")
    )
}

/// Builds the prompt asking the model for a single payroll code.
pub fn code_prompt(plan_name: &str, provider_name: &str, category: &str) -> String {
    format!(
        "Generate a unique, short, professional 6-8 character payroll code \
         (uppercase alphanumeric) for an HR deduction.\n\
         Plan: {}, Provider: {}, Category: {}.\n\
         Return ONLY the code. Example: MED-BLU-01",
        plan_name, provider_name, category
    )
}

/// JSON schema of the extraction response: an array of candidates with
/// four required string fields.
pub fn candidates_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "planName": { "type": "STRING" },
                "providerName": { "type": "STRING" },
                "category": { "type": "STRING" },
                "suggestedCode": { "type": "STRING" }
            },
            "required": ["planName", "providerName", "category", "suggestedCode"]
        }
    })
}
