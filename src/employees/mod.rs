//! Employees, their enrollments, and who is visible in the employee views.

mod access;
mod roster;
mod view;

pub use access::{AccessSelection, DualListAction, DualListSession};
pub use roster::{EmployeeDirectory, employee_id};
pub use view::{
    DemographicRow, EmployeeTable, EmployeeView, EnrollmentRow, HistorySnapshot, build_table,
    filter_visible, history_snapshot,
};
