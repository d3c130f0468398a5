//! Staff roster models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Labeled;

/// An employee on the warehouse roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    /// Employee id, e.g. "EMP-001"
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: Department,
    pub position: String,
    pub status: EmploymentStatus,
    pub hire_date: NaiveDate,
    pub performance: Performance,
}

/// Prefix shared by every employee id
pub const EMPLOYEE_ID_PREFIX: &str = "EMP-";

/// Sequence number of an employee id ("EMP-007" -> 7)
pub fn employee_sequence(id: &str) -> Option<u32> {
    id.strip_prefix(EMPLOYEE_ID_PREFIX)?.parse().ok()
}

/// Format an employee id from its sequence number
pub fn employee_id(sequence: u32) -> String {
    format!("{}{:03}", EMPLOYEE_ID_PREFIX, sequence)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Warehouse,
    Operations,
    Shipping,
    QualityControl,
}

impl Labeled for Department {
    const KIND: &'static str = "department";
    const ALL: &'static [Self] = &[
        Department::Warehouse,
        Department::Operations,
        Department::Shipping,
        Department::QualityControl,
    ];

    fn label(&self) -> &'static str {
        match self {
            Department::Warehouse => "Warehouse",
            Department::Operations => "Operations",
            Department::Shipping => "Shipping",
            Department::QualityControl => "Quality Control",
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Active,
    OnLeave,
    Inactive,
}

impl Labeled for EmploymentStatus {
    const KIND: &'static str = "employment status";
    const ALL: &'static [Self] = &[
        EmploymentStatus::Active,
        EmploymentStatus::OnLeave,
        EmploymentStatus::Inactive,
    ];

    fn label(&self) -> &'static str {
        match self {
            EmploymentStatus::Active => "Active",
            EmploymentStatus::OnLeave => "On Leave",
            EmploymentStatus::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Performance rating from the last review
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Performance {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
}

impl Labeled for Performance {
    const KIND: &'static str = "performance rating";
    const ALL: &'static [Self] = &[
        Performance::Excellent,
        Performance::Good,
        Performance::Average,
        Performance::NeedsImprovement,
    ];

    fn label(&self) -> &'static str {
        match self {
            Performance::Excellent => "Excellent",
            Performance::Good => "Good",
            Performance::Average => "Average",
            Performance::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl std::fmt::Display for Performance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
