//! Dashboard reporting tests
//!
//! Tests for the overview page including:
//! - Property 6: Aggregate Consistency

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::FilterState;
use warehouse_dashboard::services::{InventoryService, OrderService, ReportingService, ShipmentService, StaffService};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seeded() -> ReportingService {
    ReportingService::new(
        InventoryService::seeded("https://wms.example.com"),
        OrderService::seeded(),
        ShipmentService::seeded(),
        StaffService::seeded(),
    )
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Headline metrics over the seed data
    #[test]
    fn test_dashboard_metrics() {
        let metrics = seeded().metrics(date(2024, 12, 27));

        assert_eq!(metrics.inventory_items, 5);
        assert_eq!(metrics.inventory_units, 1716);
        assert_eq!(metrics.inventory_value, dec("32928.41"));
        assert_eq!(metrics.low_stock_items, 1);
        assert_eq!(metrics.out_of_stock_items, 1);
        assert_eq!(metrics.orders_today, 5);
        assert_eq!(metrics.pending_orders, 2);
        assert_eq!(metrics.shipments_in_transit, 2);
        assert_eq!(metrics.active_staff, 4);
    }

    /// The overview and the inventory page count stock the same way
    #[test]
    fn test_metrics_agree_with_inventory_summary() {
        let inventory = InventoryService::seeded("https://wms.example.com");
        let summary = inventory.summary(&FilterState::new());
        let metrics = seeded().metrics(date(2024, 12, 27));

        assert_eq!(metrics.low_stock_items, summary.low_stock);
        assert_eq!(metrics.out_of_stock_items, summary.out_of_stock);
        assert_eq!(metrics.inventory_units, summary.units);
        assert_eq!(metrics.inventory_value, summary.total_value);
    }

    /// Revenue leaves out cancelled orders
    #[test]
    fn test_revenue_excludes_cancelled() {
        let metrics = seeded().metrics(date(2024, 12, 27));
        assert_eq!(metrics.revenue, dec("17732.20"));
    }

    /// Recent orders are newest first and keep list order within a day
    #[test]
    fn test_recent_orders() {
        let ids: Vec<_> = seeded().recent_orders(3).into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["ORD-12847", "ORD-12846", "ORD-12848"]);
    }

    /// The snapshot serializes for the binary's JSON output
    #[test]
    fn test_snapshot_serializes() {
        let snapshot = seeded().snapshot(date(2024, 12, 27), 5);
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["date"], "2024-12-27");
        assert_eq!(json["alerts"].as_array().unwrap().len(), 2);
        assert_eq!(json["recent_orders"].as_array().unwrap().len(), 5);
        assert_eq!(json["metrics"]["revenue"], "17732.20");
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

        /// Property 6: Aggregate Consistency
        /// *For any* restock, the metrics match the inventory summary and the alert list
        #[test]
        fn prop_alerts_match_metrics(stock in 0u32..200, index in 0usize..5) {
            let base = InventoryService::seeded("https://wms.example.com");
            let sku = base.items().as_slice()[index].sku.clone();
            let inventory = base.with_stock(&sku, stock).unwrap();
            let reporting_inventory = inventory.clone();

            let reporting = ReportingService::new(
                inventory,
                OrderService::seeded(),
                ShipmentService::seeded(),
                StaffService::seeded(),
            );
            let metrics = reporting.metrics(date(2024, 12, 27));

            let summary = reporting_inventory.summary(&FilterState::new());
            prop_assert_eq!(metrics.low_stock_items, summary.low_stock);
            prop_assert_eq!(metrics.out_of_stock_items, summary.out_of_stock);
            prop_assert_eq!(
                reporting.low_stock_alerts().len(),
                metrics.low_stock_items + metrics.out_of_stock_items
            );
        }

        /// *For any* limit, recent orders never exceed it or the order count
        #[test]
        fn prop_recent_orders_limit(limit in 0usize..20) {
            let recent = seeded().recent_orders(limit);
            prop_assert_eq!(recent.len(), limit.min(9));
            prop_assert!(recent.windows(2).all(|w| w[0].date >= w[1].date));
        }
    }
}
