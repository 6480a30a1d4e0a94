//! The employee directory.
//!
//! The roster file lists names and a standard enrollment package; the
//! per-employee details are derived from each employee's position in the
//! roster so that the same file always produces the same directory.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::config::RosterConfig;
use crate::error::{AdminError, AdminResult};
use crate::models::{Employee, EmployeeDemographics, EnrollmentDetail};

/// Oldest birth year handed out.
const BIRTH_YEAR_BASE: i32 = 1970;

/// Sync lag window, in minutes, spread over the roster.
const SYNC_WINDOW_MINUTES: i64 = 4000;

/// Read-only collection of employees in roster order.
#[derive(Debug, Clone, Default)]
pub struct EmployeeDirectory {
    employees: Vec<Employee>,
}

impl EmployeeDirectory {
    /// Creates a directory from explicit employees.
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    /// Builds the directory described by the roster configuration.
    ///
    /// `now` anchors the last-synced timestamps.
    pub fn from_config(roster: &RosterConfig, now: DateTime<Utc>) -> Self {
        let employees = roster
            .names
            .iter()
            .enumerate()
            .map(|(index, name)| build_employee(roster, index, name, now))
            .collect();
        Self { employees }
    }

    /// Returns all employees in roster order.
    pub fn all(&self) -> &[Employee] {
        &self.employees
    }

    /// Gets an employee by id.
    pub fn get(&self, id: &str) -> AdminResult<&Employee> {
        self.employees
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| AdminError::EmployeeNotFound { id: id.to_string() })
    }

    /// Returns true if an employee with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.employees.iter().any(|e| e.id == id)
    }

    /// Returns the employees enrolled in the named plan.
    pub fn enrolled_in(&self, plan: &str) -> Vec<&Employee> {
        self.employees
            .iter()
            .filter(|e| e.is_enrolled_in(plan))
            .collect()
    }
}

/// Formats the id of the employee at `index` (0-based), e.g. `EMP001`.
pub fn employee_id(index: usize) -> String {
    format!("EMP{:03}", index + 1)
}

fn build_employee(
    roster: &RosterConfig,
    index: usize,
    name: &str,
    now: DateTime<Utc>,
) -> Employee {
    let n = index as i64;
    let department = roster.departments[index % roster.departments.len()].clone();

    let demographics = EmployeeDemographics {
        email: format!(
            "{}@{}",
            name.to_lowercase().replacen(' ', ".", 1),
            roster.email_domain
        ),
        phone: format!("(555) {}-{}", 100 + n, 2000 + n),
        department,
        hire_date: roster.hire_date,
        address1: format!("{} {}", 100 + n, roster.office.street),
        address2: if index % 4 == 0 {
            format!("Suite {}", index * 10)
        } else {
            String::new()
        },
        city: roster.office.city.clone(),
        state: roster.office.state.clone(),
        zip: roster.office.zip.clone(),
        date_of_birth: birth_date(index),
        sex: if index % 2 == 0 { "Female" } else { "Male" }.to_string(),
        ssn_last4: format!("{:04}", (1000 + index) % 10_000),
    };

    let enrollments = roster
        .standard_package
        .iter()
        .enumerate()
        .map(|(plan_index, plan)| {
            let spread = (n * 37 + plan_index as i64 * 211) % SYNC_WINDOW_MINUTES;
            EnrollmentDetail {
                name: plan.name.clone(),
                enrollment_type: plan.enrollment_type.clone(),
                frequency: plan.frequency.clone(),
                start_date: plan.start_date,
                end_date: None,
                employee_amount: plan.employee_amount,
                employer_amount: plan.employer_amount,
                is_synced: (index + plan_index) % 5 != 0,
                last_synced: now - Duration::minutes(spread),
            }
        })
        .collect();

    Employee {
        id: employee_id(index),
        name: name.to_string(),
        demographics,
        enrollments,
    }
}

fn birth_date(index: usize) -> NaiveDate {
    let year = BIRTH_YEAR_BASE + (index * 13 % 30) as i32;
    let month = (index * 7 % 12) as u32 + 1;
    let day = (index * 11 % 28) as u32 + 1;
    // Day is capped at 28, so every month/day pair is valid.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
