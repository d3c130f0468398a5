//! View-state services for the warehouse dashboard

pub mod export;
pub mod import;
pub mod inventory;
pub mod labels;
pub mod orders;
pub mod reporting;
pub mod scanner;
pub mod shipments;
pub mod staff;

pub use export::{ExportJob, ExportRequest};
pub use import::{ImportJob, ImportOptions, ImportResults};
pub use inventory::InventoryService;
pub use labels::LabelModal;
pub use orders::{OrderDraft, OrderService};
pub use reporting::{DashboardMetrics, ReportingService};
pub use scanner::ScannerSession;
pub use shipments::{NewShipmentInput, ShipmentService};
pub use staff::StaffService;

use shared::validate_no_control_chars;
use validator::ValidationError;

/// Adapt a `shared::validation` rule to a `validator` custom function
pub(crate) fn to_validation_error(code: &'static str, result: Result<(), &'static str>) -> Result<(), ValidationError> {
    result.map_err(|message| {
        let mut err = ValidationError::new(code);
        err.message = Some(message.into());
        err
    })
}

pub(crate) fn check_plain_text(text: &str) -> Result<(), ValidationError> {
    to_validation_error("control_characters", validate_no_control_chars(text))
}
