//! Merging extracted candidates into the deduction list.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ConfigLoader;
use crate::models::{Deduction, DeductionCategory, DeductionStatus, ExtractedDeduction};
use crate::quick_build::new_deduction_id;

/// Subtype recorded when a candidate has no category.
pub const DEFAULT_IMPORT_SUBTYPE: &str = "Standard";

/// The result of merging a batch of extracted candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeOutcome {
    /// Deductions added to the list, in the order they were extracted.
    pub added: Vec<Deduction>,
    /// Payroll codes that were skipped because they already existed.
    pub skipped_codes: Vec<String>,
    /// Plan names of candidates skipped for having no payroll code.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_codes: Vec<String>,
    /// Human-readable note about skipped candidates, if any were skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl MergeOutcome {
    /// Number of candidates skipped.
    pub fn skipped(&self) -> usize {
        self.skipped_codes.len() + self.missing_codes.len()
    }
}

/// Converts an extracted candidate into an active, pre-tax deduction.
///
/// The category is filed under its catalog title. Blank or unrecognised
/// categories land in `Generic / Other`. The subtype keeps the model's
/// category text, falling back to `Standard`.
pub fn candidate_to_deduction(
    candidate: &ExtractedDeduction,
    config: &ConfigLoader,
    now: DateTime<Utc>,
) -> Deduction {
    let label = candidate.category.trim();
    let subtype = if label.is_empty() {
        DEFAULT_IMPORT_SUBTYPE.to_string()
    } else {
        label.to_string()
    };

    Deduction {
        id: new_deduction_id(),
        plan_name: candidate.plan_name.trim().to_string(),
        provider_name: candidate.provider_name.trim().to_string(),
        category: catalog_title(label, config),
        subtype,
        payroll_code: candidate.suggested_code.trim().to_uppercase(),
        status: DeductionStatus::Active,
        is_pre_tax: true,
        created_at: now,
        employee_count: 0,
    }
}

fn catalog_title(label: &str, config: &ConfigLoader) -> String {
    let category = config
        .resolve_category(label)
        .unwrap_or(DeductionCategory::Other);
    config
        .get_category(category)
        .map(|definition| definition.title.clone())
        .unwrap_or_else(|_| category.label().to_string())
}

/// Splits `candidates` into deductions to add and candidates to skip.
///
/// A candidate is skipped when it has no payroll code, or when its code is
/// already used by an existing deduction or by an earlier candidate in the
/// same batch.
pub fn merge_candidates(
    existing: &[Deduction],
    candidates: &[ExtractedDeduction],
    config: &ConfigLoader,
    now: DateTime<Utc>,
) -> MergeOutcome {
    let mut taken: HashSet<String> = existing.iter().map(|d| d.payroll_code.clone()).collect();
    let mut added = Vec::new();
    let mut skipped_codes = Vec::new();
    let mut missing_codes = Vec::new();

    for candidate in candidates {
        let deduction = candidate_to_deduction(candidate, config, now);
        if deduction.payroll_code.is_empty() {
            missing_codes.push(deduction.plan_name);
        } else if taken.insert(deduction.payroll_code.clone()) {
            added.push(deduction);
        } else {
            skipped_codes.push(deduction.payroll_code);
        }
    }

    let notice = match (skipped_codes.len(), missing_codes.len()) {
        (0, 0) => None,
        (existing, 0) => Some(format!(
            "{} items were skipped because their payroll codes already exist.",
            existing
        )),
        (0, missing) => Some(format!(
            "{} items were skipped because they have no payroll code.",
            missing
        )),
        (existing, missing) => Some(format!(
            "{} items were skipped: {} have payroll codes that already exist and {} have no payroll code.",
            existing + missing,
            existing,
            missing
        )),
    };

    MergeOutcome {
        added,
        skipped_codes,
        missing_codes,
        notice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_config() -> ConfigLoader {
        ConfigLoader::load("./config/catalog").expect("Failed to load config")
    }

    fn candidate(plan: &str, category: &str, code: &str) -> ExtractedDeduction {
        ExtractedDeduction {
            plan_name: plan.to_string(),
            provider_name: "Acme".to_string(),
            category: category.to_string(),
            suggested_code: code.to_string(),
        }
    }

    fn existing(code: &str) -> Deduction {
        candidate_to_deduction(&candidate("Existing", "Medical", code), &create_config(), Utc::now())
    }

    #[test]
    fn test_candidate_defaults() {
        let now = Utc::now();
        let deduction =
            candidate_to_deduction(&candidate(" Life ", "", "life-01"), &create_config(), now);
        assert_eq!(deduction.plan_name, "Life");
        assert_eq!(deduction.category, "Generic / Other");
        assert_eq!(deduction.subtype, DEFAULT_IMPORT_SUBTYPE);
        assert_eq!(deduction.payroll_code, "LIFE-01");
        assert_eq!(deduction.status, DeductionStatus::Active);
        assert!(deduction.is_pre_tax);
        assert_eq!(deduction.created_at, now);
    }

    #[test]
    fn test_category_filed_under_catalog_title() {
        let config = create_config();
        let garnishment = candidate_to_deduction(
            &candidate("Child Support", "Garnishment / Court Order", "GAR-01"),
            &config,
            Utc::now(),
        );
        assert_eq!(garnishment.category, "Garnishment");
        assert_eq!(garnishment.subtype, "Garnishment / Court Order");

        let pets = candidate_to_deduction(
            &candidate("Pet Plan", "Pet Insurance", "PET-01"),
            &config,
            Utc::now(),
        );
        assert_eq!(pets.category, "Generic / Other");
        assert_eq!(pets.subtype, "Pet Insurance");
    }

    #[test]
    fn test_existing_codes_are_skipped() {
        let outcome = merge_candidates(
            &[existing("MED-BCBS-01")],
            &[
                candidate("Basic PPO", "Medical", "MED-BCBS-01"),
                candidate("Gold HMO", "Medical", "MED-KAI-01"),
            ],
            &create_config(),
            Utc::now(),
        );

        assert_eq!(outcome.added.len(), 1);
        assert_eq!(outcome.added[0].payroll_code, "MED-KAI-01");
        assert_eq!(outcome.skipped_codes, vec!["MED-BCBS-01"]);
        assert_eq!(
            outcome.notice.as_deref(),
            Some("1 items were skipped because their payroll codes already exist.")
        );
    }

    #[test]
    fn test_repeated_code_within_batch_keeps_first() {
        let outcome = merge_candidates(
            &[],
            &[
                candidate("Dental A", "Dental", "DEN-01"),
                candidate("Dental B", "Dental", "den-01"),
            ],
            &create_config(),
            Utc::now(),
        );

        assert_eq!(outcome.added.len(), 1);
        assert_eq!(outcome.added[0].plan_name, "Dental A");
        assert_eq!(outcome.skipped(), 1);
    }

    #[test]
    fn test_blank_codes_are_skipped() {
        let outcome = merge_candidates(
            &[existing("VIS-A")],
            &[
                candidate("Vision A", "Vision", "VIS-A"),
                candidate("No Code", "Vision", "  "),
                candidate("Vision B", "Vision", "VIS-B"),
            ],
            &create_config(),
            Utc::now(),
        );

        assert_eq!(outcome.added.len(), 1);
        assert_eq!(outcome.missing_codes, vec!["No Code"]);
        assert_eq!(outcome.skipped(), 2);
        assert_eq!(
            outcome.notice.as_deref(),
            Some(
                "2 items were skipped: 1 have payroll codes that already exist and 1 have no payroll code."
            )
        );
    }

    #[test]
    fn test_no_notice_when_nothing_skipped() {
        let outcome = merge_candidates(
            &[],
            &[candidate("A", "Vision", "VIS-A")],
            &create_config(),
            Utc::now(),
        );
        assert!(outcome.notice.is_none());
        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json.get("notice").is_none());
        assert!(json.get("missing_codes").is_none());
    }
}
