//! Warehouse Dashboard - snapshot printer
//!
//! Seeds the dashboard services and prints the overview as JSON.
//! Usage: `wms-dashboard [YYYY-MM-DD]`; the date defaults to the seed anchor.

use anyhow::Context;
use chrono::NaiveDate;
use shared::seed::seed_anchor;
use warehouse_dashboard::services::{InventoryService, OrderService, ReportingService, ShipmentService, StaffService};
use warehouse_dashboard::{telemetry, Config};

const RECENT_ORDERS: usize = 5;

fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    telemetry::init(&config.logging);

    tracing::info!("Starting warehouse dashboard");
    tracing::info!("Environment: {}", config.environment);

    let today = match std::env::args().nth(1) {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid date argument '{}', expected YYYY-MM-DD", raw))?,
        None => seed_anchor().date_naive(),
    };

    let reporting = ReportingService::new(
        InventoryService::seeded(config.origin.clone()),
        OrderService::seeded(),
        ShipmentService::seeded(),
        StaffService::seeded(),
    );

    let snapshot = reporting.snapshot(today, RECENT_ORDERS);
    tracing::info!(
        %today,
        alerts = snapshot.alerts.len(),
        pending_orders = snapshot.metrics.pending_orders,
        "Dashboard snapshot ready"
    );

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
