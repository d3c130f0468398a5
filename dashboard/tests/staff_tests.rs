//! Staff roster tests
//!
//! Tests for staff management including:
//! - Property 10: Snapshot Immutability
//! - Property 14: Employee Id Uniqueness

use chrono::NaiveDate;
use proptest::prelude::*;
use std::collections::HashSet;

use shared::{Department, EmploymentStatus, FilterState, Performance};
use warehouse_dashboard::services::staff::{NewEmployeeInput, StaffService};
use warehouse_dashboard::AppError;

fn hire_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 27).unwrap()
}

fn new_hire(email: &str) -> NewEmployeeInput {
    NewEmployeeInput {
        first_name: "Maria".to_string(),
        last_name: "Garcia".to_string(),
        email: email.to_string(),
        phone: "(555) 678-9012".to_string(),
        department: Department::Shipping,
        position: "Forklift Operator".to_string(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Department and status filters combine
    #[test]
    fn test_department_and_status_filter() {
        let service = StaffService::seeded();
        let filter = FilterState::new()
            .with_eq("department", "warehouse")
            .with_eq("status", "active");

        let ids: Vec<_> = service.list(&filter).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["EMP-001", "EMP-005"]);
    }

    /// Performance filter accepts slugs
    #[test]
    fn test_performance_filter() {
        let service = StaffService::seeded();
        let filter = FilterState::new().with_eq("performance", "excellent");

        assert_eq!(service.list(&filter).len(), 2);
    }

    /// Summary counts by status and department
    #[test]
    fn test_staff_summary() {
        let service = StaffService::seeded();
        let summary = service.summary(&FilterState::new());

        assert_eq!(summary.staff, 5);
        assert_eq!(summary.active(), 4);
        assert_eq!(summary.by_status.get(EmploymentStatus::OnLeave), 1);
        assert_eq!(summary.by_department.get(Department::Warehouse), 2);
        assert_eq!(summary.by_performance.get(Performance::NeedsImprovement), 0);
    }

    /// New hires get the next id and default status
    #[test]
    fn test_add_employee() {
        let service = StaffService::seeded();
        let updated = service.add_employee(new_hire("Maria.Garcia@quantus.com"), hire_date()).unwrap();

        assert_eq!(service.staff().len(), 5);
        assert_eq!(updated.staff().len(), 6);

        let hire = updated.get("EMP-006").unwrap();
        assert_eq!(hire.name, "Maria Garcia");
        assert_eq!(hire.email, "maria.garcia@quantus.com");
        assert_eq!(hire.status, EmploymentStatus::Active);
        assert_eq!(hire.performance, Performance::Good);
        assert_eq!(hire.hire_date, hire_date());
    }

    /// Emails are unique, ignoring case
    #[test]
    fn test_add_employee_duplicate_email() {
        let service = StaffService::seeded();
        let err = service
            .add_employee(new_hire("JOHN.SMITH@quantus.com"), hire_date())
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateEntry(ref field) if field == "email"));
    }

    /// Form validation names the offending field
    #[test]
    fn test_add_employee_validation() {
        let service = StaffService::seeded();

        let err = service.add_employee(new_hire("not-an-email"), hire_date()).unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "email"));

        let mut input = new_hire("maria@quantus.com");
        input.phone = "555-0100".to_string();
        let err = service.add_employee(input, hire_date()).unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "phone"));

        let mut input = new_hire("maria@quantus.com");
        input.first_name = String::new();
        let err = service.add_employee(input, hire_date()).unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "first_name"));
    }

    /// Ids are not reused after a removal
    #[test]
    fn test_next_id_after_removal() {
        let service = StaffService::seeded().remove("EMP-003").unwrap();
        assert_eq!(service.staff().len(), 4);
        assert_eq!(service.next_employee_id(), "EMP-006");

        assert!(matches!(service.remove("EMP-003"), Err(AppError::NotFound(_))));
    }

    /// Status changes leave the old roster alone
    #[test]
    fn test_update_status() {
        let service = StaffService::seeded();
        let updated = service.update_status("emp-004", EmploymentStatus::Active).unwrap();

        assert_eq!(updated.get("EMP-004").unwrap().status, EmploymentStatus::Active);
        assert_eq!(service.get("EMP-004").unwrap().status, EmploymentStatus::OnLeave);
        assert_eq!(updated.summary(&FilterState::new()).active(), 5);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property 14: Employee Id Uniqueness
        /// *For any* sequence of hires and removals, ids stay unique
        #[test]
        fn prop_ids_stay_unique(ops in prop::collection::vec(any::<bool>(), 1..20)) {
            let mut service = StaffService::seeded();
            for (i, hire) in ops.iter().enumerate() {
                if *hire || service.staff().is_empty() {
                    let input = new_hire(&format!("hire{}@quantus.com", i));
                    service = service.add_employee(input, hire_date()).unwrap();
                } else {
                    let first = service.staff().as_slice()[0].id.clone();
                    service = service.remove(&first).unwrap();
                }
            }

            let ids: HashSet<_> = service.staff().iter().map(|s| s.id.clone()).collect();
            prop_assert_eq!(ids.len(), service.staff().len());
        }

        /// Property 10: Snapshot Immutability
        /// *For any* removal, the previous roster is unchanged
        #[test]
        fn prop_remove_preserves_previous_snapshot(index in 0usize..5) {
            let service = StaffService::seeded();
            let before: Vec<_> = service.staff().as_slice().to_vec();

            let updated = service.remove(&before[index].id).unwrap();

            prop_assert_eq!(service.staff().as_slice(), before.as_slice());
            prop_assert_eq!(updated.staff().len(), 4);
            prop_assert!(updated.get(&before[index].id).is_err());
        }
    }
}
