//! Read-only employee tables.
//!
//! Both tables show only the employees in the access selection, filtered by
//! the search box. The "Deductions" table has one row per enrollment; the
//! "Demographic Info" table has one row per employee.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AdminError, AdminResult};
use crate::models::{ContributionAmount, Employee, EnrollmentDetail};

use super::{AccessSelection, EmployeeDirectory};

/// Which employee table to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeView {
    /// One row per enrollment.
    #[default]
    Deductions,
    /// One row per employee with demographic details.
    Demographics,
}

/// A row of the deductions table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentRow {
    /// The employee id.
    pub employee_id: String,
    /// The employee name.
    pub employee_name: String,
    /// The plan name.
    pub plan: String,
    /// The plan type.
    #[serde(rename = "type")]
    pub enrollment_type: String,
    /// Pay frequency.
    pub frequency: String,
    /// Coverage start date.
    pub start_date: NaiveDate,
    /// Coverage end date, `-` while open.
    pub end_date: String,
    /// Employee contribution.
    pub employee_amount: ContributionAmount,
    /// Employer contribution.
    pub employer_amount: ContributionAmount,
    /// Whether the last sync succeeded.
    pub is_synced: bool,
    /// When the enrollment was last synced.
    pub last_synced: DateTime<Utc>,
}

/// A row of the demographics table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicRow {
    /// The employee id.
    pub employee_id: String,
    /// The employee name.
    pub employee_name: String,
    /// Work email.
    pub email: String,
    /// Work phone.
    pub phone: String,
    /// Department.
    pub department: String,
    /// Hire date.
    pub hire_date: NaiveDate,
    /// Street address.
    pub address1: String,
    /// `address2, city, state zip`.
    pub locality: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Sex.
    pub sex: String,
    /// SSN with all but the last four digits masked.
    pub ssn: String,
}

/// The rows of one employee table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", content = "rows", rename_all = "snake_case")]
pub enum EmployeeTable {
    /// Rows of the deductions table.
    Deductions(Vec<EnrollmentRow>),
    /// Rows of the demographics table.
    Demographics(Vec<DemographicRow>),
}

impl EmployeeTable {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            EmployeeTable::Deductions(rows) => rows.len(),
            EmployeeTable::Demographics(rows) => rows.len(),
        }
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An enrollment as shown in the deduction history dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    /// The employee id.
    pub employee_id: String,
    /// The employee name.
    pub employee_name: String,
    /// The enrollment.
    pub enrollment: EnrollmentDetail,
    /// Whether the plan is a retirement plan (amounts are percentages).
    pub is_retirement: bool,
}

/// Filters visible employees and their enrollments by `query`.
///
/// An enrollment is kept when the employee name, the plan name or the plan
/// type contains the query (case-insensitive). Employees left with no
/// enrollments are dropped unless the query is empty.
pub fn filter_visible(
    directory: &EmployeeDirectory,
    access: &AccessSelection,
    query: &str,
) -> Vec<Employee> {
    let needle = query.to_lowercase();
    directory
        .all()
        .iter()
        .filter(|e| access.is_visible(&e.id))
        .map(|e| {
            let name_matches = e.name.to_lowercase().contains(&needle);
            let enrollments = e
                .enrollments
                .iter()
                .filter(|en| {
                    name_matches
                        || en.name.to_lowercase().contains(&needle)
                        || en.enrollment_type.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect();
            Employee {
                enrollments,
                ..e.clone()
            }
        })
        .filter(|e| !e.enrollments.is_empty() || query.is_empty())
        .collect()
}

/// Builds the requested employee table.
pub fn build_table(
    directory: &EmployeeDirectory,
    access: &AccessSelection,
    query: &str,
    view: EmployeeView,
) -> EmployeeTable {
    let employees = filter_visible(directory, access, query);
    match view {
        EmployeeView::Deductions => EmployeeTable::Deductions(
            employees
                .iter()
                .flat_map(|e| e.enrollments.iter().map(move |en| enrollment_row(e, en)))
                .collect(),
        ),
        EmployeeView::Demographics => {
            EmployeeTable::Demographics(employees.iter().map(demographic_row).collect())
        }
    }
}

/// Looks up one enrollment for the history dialog.
pub fn history_snapshot(
    directory: &EmployeeDirectory,
    employee_id: &str,
    plan: &str,
) -> AdminResult<HistorySnapshot> {
    let employee = directory.get(employee_id)?;
    let enrollment = employee
        .enrollment(plan)
        .ok_or_else(|| AdminError::EnrollmentNotFound {
            employee_id: employee_id.to_string(),
            plan: plan.to_string(),
        })?;

    Ok(HistorySnapshot {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        is_retirement: enrollment.is_retirement(),
        enrollment: enrollment.clone(),
    })
}

fn enrollment_row(employee: &Employee, enrollment: &EnrollmentDetail) -> EnrollmentRow {
    EnrollmentRow {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        plan: enrollment.name.clone(),
        enrollment_type: enrollment.enrollment_type.clone(),
        frequency: enrollment.frequency.clone(),
        start_date: enrollment.start_date,
        end_date: enrollment.end_date_display(),
        employee_amount: enrollment.employee_amount,
        employer_amount: enrollment.employer_amount,
        is_synced: enrollment.is_synced,
        last_synced: enrollment.last_synced,
    }
}

fn demographic_row(employee: &Employee) -> DemographicRow {
    let d = &employee.demographics;
    DemographicRow {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        email: d.email.clone(),
        phone: d.phone.clone(),
        department: d.department.clone(),
        hire_date: d.hire_date,
        address1: d.address1.clone(),
        locality: d.locality_line(),
        date_of_birth: d.date_of_birth,
        sex: d.sex.clone(),
        ssn: d.masked_ssn(),
    }
}
