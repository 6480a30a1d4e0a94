//! Employee model and related types.
//!
//! This module defines the Employee struct and its demographic record
//! for the read-only employee tables.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::EnrollmentDetail;

/// Demographic information shown in the "Demographic Info" view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDemographics {
    /// Work email address.
    pub email: String,
    /// Work phone number.
    pub phone: String,
    /// Department name.
    pub department: String,
    /// The date the employee was hired.
    pub hire_date: NaiveDate,
    /// First address line.
    pub address1: String,
    /// Second address line; may be empty.
    #[serde(default)]
    pub address2: String,
    /// City.
    pub city: String,
    /// State code.
    pub state: String,
    /// Postal code.
    pub zip: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Sex as recorded by HR.
    pub sex: String,
    /// Last four digits of the social security number.
    pub ssn_last4: String,
}

impl EmployeeDemographics {
    /// Returns the SSN with everything but the last four digits masked.
    ///
    /// # Examples
    ///
    /// ```
    /// # use deduction_admin::models::EmployeeDemographics;
    /// # use chrono::NaiveDate;
    /// # let demographics = EmployeeDemographics {
    /// #     email: "sarah.jenkins@company.com".to_string(),
    /// #     phone: "(555) 100-2000".to_string(),
    /// #     department: "Engineering".to_string(),
    /// #     hire_date: NaiveDate::from_ymd_opt(2021, 3, 12).unwrap(),
    /// #     address1: "100 Corporate Way".to_string(),
    /// #     address2: String::new(),
    /// #     city: "San Francisco".to_string(),
    /// #     state: "CA".to_string(),
    /// #     zip: "94105".to_string(),
    /// #     date_of_birth: NaiveDate::from_ymd_opt(1980, 5, 17).unwrap(),
    /// #     sex: "Female".to_string(),
    /// #     ssn_last4: "1000".to_string(),
    /// # };
    /// assert_eq!(demographics.masked_ssn(), "***-**-1000");
    /// ```
    pub fn masked_ssn(&self) -> String {
        format!("***-**-{}", self.ssn_last4)
    }

    /// Returns the second address line as `address2, city, state zip`,
    /// leaving out `address2` when it is blank.
    pub fn locality_line(&self) -> String {
        let prefix = if self.address2.trim().is_empty() {
            String::new()
        } else {
            format!("{}, ", self.address2)
        };
        format!("{}{}, {} {}", prefix, self.city, self.state, self.zip)
    }
}

/// An employee with their benefit enrollments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee (e.g., "EMP001").
    pub id: String,
    /// Full name.
    pub name: String,
    /// Demographic details.
    pub demographics: EmployeeDemographics,
    /// Plans the employee is enrolled in.
    #[serde(default)]
    pub enrollments: Vec<EnrollmentDetail>,
}

impl Employee {
    /// Finds an enrollment by plan name, ignoring case.
    pub fn enrollment(&self, plan: &str) -> Option<&EnrollmentDetail> {
        self.enrollments
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(plan.trim()))
    }

    /// Returns true if the employee is enrolled in the named plan.
    pub fn is_enrolled_in(&self, plan: &str) -> bool {
        self.enrollment(plan).is_some()
    }
}
