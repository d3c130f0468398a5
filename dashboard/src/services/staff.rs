//! Staff roster service

use chrono::NaiveDate;
use serde::Deserialize;
use shared::seed::seed_staff;
use shared::{
    apply_filters, employee_id, employee_sequence, validate_email, validate_phone, Department, EmploymentStatus,
    FilterState, Performance, StaffMember, StaffSummary,
};
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::services::{check_plain_text, to_validation_error};
use crate::store::Collection;

fn check_phone(phone: &str) -> Result<(), ValidationError> {
    to_validation_error("phone", validate_phone(phone))
}

fn check_email(email: &str) -> Result<(), ValidationError> {
    to_validation_error("email", validate_email(email))
}

/// Input from the add employee form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewEmployeeInput {
    #[validate(length(min = 1, max = 50, message = "First name is required"), custom = "check_plain_text")]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name is required"), custom = "check_plain_text")]
    pub last_name: String,
    #[validate(custom = "check_email")]
    pub email: String,
    #[validate(custom = "check_phone")]
    pub phone: String,
    pub department: Department,
    #[validate(length(min = 1, max = 100, message = "Position is required"), custom = "check_plain_text")]
    pub position: String,
}

/// Staff service over an immutable roster snapshot
#[derive(Debug, Clone)]
pub struct StaffService {
    staff: Collection<StaffMember>,
}

impl StaffService {
    /// Create a new StaffService instance
    pub fn new(staff: Collection<StaffMember>) -> Self {
        Self { staff }
    }

    pub fn seeded() -> Self {
        Self::new(Collection::new(seed_staff()))
    }

    pub fn staff(&self) -> &Collection<StaffMember> {
        &self.staff
    }

    /// Filter keys: `department`, `status`, `performance`, plus any staff field
    pub fn list(&self, filter: &FilterState) -> Vec<StaffMember> {
        let staff = apply_filters(self.staff.as_slice(), filter);
        tracing::debug!(matched = staff.len(), total = self.staff.len(), "Listed staff");
        staff
    }

    pub fn summary(&self, filter: &FilterState) -> StaffSummary {
        StaffSummary::from_staff(&self.list(filter))
    }

    pub fn get(&self, id: &str) -> AppResult<&StaffMember> {
        let id = id.trim();
        self.staff
            .find(|s| s.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| AppError::NotFound(format!("Employee {}", id)))
    }

    /// Id the next hire receives: one past the highest sequence in use
    pub fn next_employee_id(&self) -> String {
        let highest = self
            .staff
            .iter()
            .filter_map(|s| employee_sequence(&s.id))
            .max()
            .unwrap_or(0);
        employee_id(highest + 1)
    }

    /// Add a new hire. Active, rated Good, hired on `hire_date`.
    pub fn add_employee(&self, input: NewEmployeeInput, hire_date: NaiveDate) -> AppResult<Self> {
        input.validate()?;

        let email = input.email.trim().to_lowercase();
        if self.staff.contains(|s| s.email.eq_ignore_ascii_case(&email)) {
            tracing::warn!(email = %email, "Rejected duplicate employee email");
            return Err(AppError::DuplicateEntry("email".to_string()));
        }

        let member = StaffMember {
            id: self.next_employee_id(),
            name: format!("{} {}", input.first_name.trim(), input.last_name.trim()),
            email,
            phone: input.phone.trim().to_string(),
            department: input.department,
            position: input.position.trim().to_string(),
            status: EmploymentStatus::Active,
            hire_date,
            performance: Performance::Good,
        };

        tracing::info!(id = %member.id, department = %member.department, "Added employee");
        Ok(Self::new(self.staff.with_pushed(member)))
    }

    /// Add an already-identified member, as the importer does
    pub fn insert(&self, member: StaffMember) -> AppResult<Self> {
        if self.staff.contains(|s| s.id.eq_ignore_ascii_case(&member.id)) {
            return Err(AppError::DuplicateEntry("id".to_string()));
        }
        Ok(Self::new(self.staff.with_pushed(member)))
    }

    pub fn remove(&self, id: &str) -> AppResult<Self> {
        let target = self.get(id)?.id.clone();
        let staff = self
            .staff
            .without(|s| s.id == target)
            .ok_or_else(|| AppError::NotFound(format!("Employee {}", target)))?;

        tracing::info!(id = %target, "Removed employee");
        Ok(Self::new(staff))
    }

    pub fn update_status(&self, id: &str, status: EmploymentStatus) -> AppResult<Self> {
        let target = self.get(id)?.id.clone();
        let staff = self
            .staff
            .with_updated(|s| s.id == target, |s| StaffMember { status, ..s.clone() })
            .ok_or_else(|| AppError::NotFound(format!("Employee {}", target)))?;

        tracing::info!(id = %target, status = %status, "Employee status updated");
        Ok(Self::new(staff))
    }
}
