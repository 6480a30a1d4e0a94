//! Enrollment models.
//!
//! An enrollment ties an employee to a deduction plan, with the amounts
//! each side contributes and the last time the record was synced.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AdminError;

/// A contribution towards a plan: either a currency amount per pay
/// frequency or a percentage of pay.
///
/// Serialized as its display string, e.g. `"$155.00"` or `"5%"`.
///
/// # Example
///
/// ```
/// use deduction_admin::models::ContributionAmount;
/// use rust_decimal::Decimal;
///
/// let fixed: ContributionAmount = "$48.50".parse().unwrap();
/// assert_eq!(fixed, ContributionAmount::Fixed(Decimal::new(4850, 2)));
/// assert_eq!(fixed.to_string(), "$48.50");
///
/// let percent: ContributionAmount = "5%".parse().unwrap();
/// assert_eq!(percent.to_string(), "5%");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionAmount {
    /// A fixed currency amount.
    Fixed(Decimal),
    /// A percentage of gross pay.
    Percent(Decimal),
}

impl fmt::Display for ContributionAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContributionAmount::Fixed(amount) => write!(f, "${:.2}", amount),
            ContributionAmount::Percent(pct) => write!(f, "{}%", pct.normalize()),
        }
    }
}

impl FromStr for ContributionAmount {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || AdminError::InvalidRequest {
            message: format!("invalid contribution amount: {}", s),
        };

        if let Some(pct) = raw.strip_suffix('%') {
            let value = Decimal::from_str(pct.trim()).map_err(|_| invalid())?;
            return Ok(ContributionAmount::Percent(value));
        }

        let amount = raw.strip_prefix('$').unwrap_or(raw).replace(',', "");
        let value = Decimal::from_str(amount.trim()).map_err(|_| invalid())?;
        Ok(ContributionAmount::Fixed(value))
    }
}

impl Serialize for ContributionAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ContributionAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// An employee's enrollment in one plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentDetail {
    /// The plan name (matches a deduction's plan name).
    pub name: String,
    /// The plan type (e.g., "Medical", "Retirement").
    #[serde(rename = "type")]
    pub enrollment_type: String,
    /// How often the deduction is taken (e.g., "Bi-weekly").
    pub frequency: String,
    /// First day of coverage.
    pub start_date: NaiveDate,
    /// Last day of coverage, if the enrollment has ended.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Amount withheld from the employee.
    pub employee_amount: ContributionAmount,
    /// Amount contributed by the employer.
    pub employer_amount: ContributionAmount,
    /// Whether the last sync to payroll succeeded.
    #[serde(default)]
    pub is_synced: bool,
    /// When the enrollment was last synced.
    pub last_synced: DateTime<Utc>,
}

impl EnrollmentDetail {
    /// Returns true if this enrollment is a retirement plan.
    ///
    /// The type mentions "retirement" or the plan name mentions "401k".
    pub fn is_retirement(&self) -> bool {
        self.enrollment_type.to_lowercase().contains("retirement")
            || self.name.to_lowercase().contains("401k")
    }

    /// Returns the end date for display, `-` when still open.
    pub fn end_date_display(&self) -> String {
        self.end_date
            .map(|d| d.format("%m/%d/%Y").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_enrollment(name: &str, enrollment_type: &str) -> EnrollmentDetail {
        EnrollmentDetail {
            name: name.to_string(),
            enrollment_type: enrollment_type.to_string(),
            frequency: "Monthly".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: None,
            employee_amount: ContributionAmount::Percent(Decimal::new(5, 0)),
            employer_amount: ContributionAmount::Percent(Decimal::new(3, 0)),
            is_synced: true,
            last_synced: Utc::now(),
        }
    }

    #[test]
    fn test_parse_fixed_with_thousands_separator() {
        let amount: ContributionAmount = "$1,250.5".parse().unwrap();
        assert_eq!(amount, ContributionAmount::Fixed(Decimal::new(125050, 2)));
        assert_eq!(amount.to_string(), "$1250.50");
    }

    #[test]
    fn test_parse_bare_number_is_fixed() {
        let amount: ContributionAmount = "0".parse().unwrap();
        assert_eq!(amount, ContributionAmount::Fixed(Decimal::ZERO));
        assert_eq!(amount.to_string(), "$0.00");
    }

    #[test]
    fn test_parse_fractional_percent() {
        let amount: ContributionAmount = "4.5%".parse().unwrap();
        assert_eq!(amount, ContributionAmount::Percent(Decimal::new(45, 1)));
        assert_eq!(amount.to_string(), "4.5%");
    }

    #[test]
    fn test_parse_garbage_returns_error() {
        assert!("lots".parse::<ContributionAmount>().is_err());
        assert!("%".parse::<ContributionAmount>().is_err());
    }

    #[test]
    fn test_enrollment_serializes_type_and_amounts_as_strings() {
        let enrollment = create_enrollment("401k Contribution", "Retirement");
        let json = serde_json::to_value(&enrollment).unwrap();
        assert_eq!(json["type"], "Retirement");
        assert_eq!(json["employee_amount"], "5%");
        assert_eq!(json["end_date"], serde_json::Value::Null);
    }

    #[test]
    fn test_is_retirement_by_type_or_name() {
        assert!(create_enrollment("Pension", "Retirement").is_retirement());
        assert!(create_enrollment("Company 401K Match", "Savings").is_retirement());
        assert!(!create_enrollment("Basic PPO", "Medical").is_retirement());
    }

    #[test]
    fn test_end_date_display() {
        let mut enrollment = create_enrollment("Basic PPO", "Medical");
        assert_eq!(enrollment.end_date_display(), "-");
        enrollment.end_date = NaiveDate::from_ymd_opt(2026, 6, 28);
        assert_eq!(enrollment.end_date_display(), "06/28/2026");
    }
}
