//! Warehouse Dashboard - view-state services
//!
//! Inventory, orders, shipments and staff views over immutable snapshots,
//! plus the label modal, barcode scanner session, CSV import/export and
//! dashboard reporting.

pub mod config;
pub mod error;
pub mod services;
pub mod store;
pub mod telemetry;

pub use config::Config;
pub use error::{AppError, AppResult, ErrorDetail};
pub use store::Collection;
