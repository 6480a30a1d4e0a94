//! Deduction category model.
//!
//! This module defines the closed set of categories a deduction can belong
//! to, along with their stable ids and canonical labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AdminError;

/// The category of a payroll deduction.
///
/// Serialized as its stable id (e.g. `"MEDICAL"`). The canonical label
/// (e.g. `"Retirement Contribution"`) is what the extraction model is asked
/// to classify into.
///
/// # Example
///
/// ```
/// use deduction_admin::models::DeductionCategory;
///
/// let category: DeductionCategory = "Garnishment / Court Order".parse().unwrap();
/// assert_eq!(category, DeductionCategory::Garnishment);
/// assert!(!category.default_pre_tax());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeductionCategory {
    /// Health insurance premiums.
    Medical,
    /// Dental insurance premiums.
    Dental,
    /// Vision insurance premiums.
    Vision,
    /// 401k/403b style contributions.
    Retirement,
    /// FSA, HSA and similar accounts.
    Benefits,
    /// Court ordered withholdings.
    Garnishment,
    /// Plan or company loans.
    Loan,
    /// Mandatory state programs.
    Statutory,
    /// Anything else.
    Other,
}

impl DeductionCategory {
    /// All categories in catalog order.
    pub const ALL: [DeductionCategory; 9] = [
        DeductionCategory::Medical,
        DeductionCategory::Dental,
        DeductionCategory::Vision,
        DeductionCategory::Retirement,
        DeductionCategory::Benefits,
        DeductionCategory::Garnishment,
        DeductionCategory::Loan,
        DeductionCategory::Statutory,
        DeductionCategory::Other,
    ];

    /// Returns the stable id used in URLs and the catalog file.
    pub fn id(&self) -> &'static str {
        match self {
            DeductionCategory::Medical => "MEDICAL",
            DeductionCategory::Dental => "DENTAL",
            DeductionCategory::Vision => "VISION",
            DeductionCategory::Retirement => "RETIREMENT",
            DeductionCategory::Benefits => "BENEFITS",
            DeductionCategory::Garnishment => "GARNISHMENT",
            DeductionCategory::Loan => "LOAN",
            DeductionCategory::Statutory => "STATUTORY",
            DeductionCategory::Other => "OTHER",
        }
    }

    /// Returns the canonical label offered to the extraction model.
    pub fn label(&self) -> &'static str {
        match self {
            DeductionCategory::Medical => "Medical",
            DeductionCategory::Dental => "Dental",
            DeductionCategory::Vision => "Vision",
            DeductionCategory::Retirement => "Retirement Contribution",
            DeductionCategory::Benefits => "Tax-Advantaged Benefits",
            DeductionCategory::Garnishment => "Garnishment / Court Order",
            DeductionCategory::Loan => "Loan Repayment",
            DeductionCategory::Statutory => "State Program / Statutory",
            DeductionCategory::Other => "Generic / Other",
        }
    }

    /// Whether a new deduction in this category starts out pre-tax.
    ///
    /// Statutory programs and garnishments are withheld after tax.
    pub fn default_pre_tax(&self) -> bool {
        !matches!(
            self,
            DeductionCategory::Statutory | DeductionCategory::Garnishment
        )
    }
}

impl fmt::Display for DeductionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for DeductionCategory {
    type Err = AdminError;

    /// Accepts the id or the canonical label, ignoring case and
    /// surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        DeductionCategory::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(needle) || c.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| AdminError::UnknownCategory {
                category: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_by_id_and_label() {
        assert_eq!(
            "dental".parse::<DeductionCategory>().unwrap(),
            DeductionCategory::Dental
        );
        assert_eq!(
            "Tax-Advantaged Benefits".parse::<DeductionCategory>().unwrap(),
            DeductionCategory::Benefits
        );
        assert_eq!(
            "  loan repayment ".parse::<DeductionCategory>().unwrap(),
            DeductionCategory::Loan
        );
    }

    #[test]
    fn test_parse_unknown_returns_error() {
        match "Pet Insurance".parse::<DeductionCategory>() {
            Err(AdminError::UnknownCategory { category }) => {
                assert_eq!(category, "Pet Insurance");
            }
            other => panic!("Expected UnknownCategory, got {:?}", other),
        }
    }

    #[test]
    fn test_default_pre_tax() {
        let post_tax: Vec<_> = DeductionCategory::ALL
            .into_iter()
            .filter(|c| !c.default_pre_tax())
            .collect();
        assert_eq!(
            post_tax,
            vec![DeductionCategory::Garnishment, DeductionCategory::Statutory]
        );
    }

    #[test]
    fn test_serializes_as_id() {
        assert_eq!(
            serde_json::to_string(&DeductionCategory::Retirement).unwrap(),
            "\"RETIREMENT\""
        );
        let parsed: DeductionCategory = serde_json::from_str("\"OTHER\"").unwrap();
        assert_eq!(parsed, DeductionCategory::Other);
    }
}
