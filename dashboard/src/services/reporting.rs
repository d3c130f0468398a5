//! Reporting service for the dashboard overview
//! Headline metrics, low-stock alerts and recent orders

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{EmploymentStatus, InventorySummary, Order, OrderStatus};

use crate::services::inventory::{InventoryService, StockAlert};
use crate::services::orders::OrderService;
use crate::services::shipments::ShipmentService;
use crate::services::staff::StaffService;

/// Reporting service over the other services' snapshots
#[derive(Debug, Clone)]
pub struct ReportingService {
    inventory: InventoryService,
    orders: OrderService,
    shipments: ShipmentService,
    staff: StaffService,
}

/// Dashboard metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub inventory_items: usize,
    pub inventory_units: u64,
    pub inventory_value: Decimal,
    /// In stock but at or below the minimum; out-of-stock items are counted separately
    pub low_stock_items: usize,
    pub out_of_stock_items: usize,
    pub orders_today: usize,
    pub pending_orders: usize,
    /// Order value excluding cancelled orders
    pub revenue: Decimal,
    pub shipments_in_transit: usize,
    pub active_staff: usize,
}

/// Everything the overview page renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub date: NaiveDate,
    pub metrics: DashboardMetrics,
    pub alerts: Vec<StockAlert>,
    pub recent_orders: Vec<Order>,
}

impl ReportingService {
    pub fn new(
        inventory: InventoryService,
        orders: OrderService,
        shipments: ShipmentService,
        staff: StaffService,
    ) -> Self {
        Self {
            inventory,
            orders,
            shipments,
            staff,
        }
    }

    /// Headline numbers for `today`
    pub fn metrics(&self, today: NaiveDate) -> DashboardMetrics {
        let inventory = InventorySummary::from_items(self.inventory.items().as_slice());
        let orders = self.orders.orders().as_slice();

        let metrics = DashboardMetrics {
            inventory_items: inventory.items,
            inventory_units: inventory.units,
            inventory_value: inventory.total_value,
            low_stock_items: inventory.low_stock,
            out_of_stock_items: inventory.out_of_stock,
            orders_today: orders.iter().filter(|o| o.date == today).count(),
            pending_orders: orders.iter().filter(|o| o.status == OrderStatus::Pending).count(),
            revenue: orders
                .iter()
                .filter(|o| o.status != OrderStatus::Cancelled)
                .map(|o| o.total)
                .sum(),
            shipments_in_transit: self.shipments.shipments().iter().filter(|s| s.is_in_flight()).count(),
            active_staff: self
                .staff
                .staff()
                .iter()
                .filter(|s| s.status == EmploymentStatus::Active)
                .count(),
        };

        tracing::debug!(%today, items = metrics.inventory_items, orders = orders.len(), "Computed dashboard metrics");
        metrics
    }

    pub fn low_stock_alerts(&self) -> Vec<StockAlert> {
        self.inventory.low_stock_alerts()
    }

    /// Newest orders first; ties keep list order
    pub fn recent_orders(&self, limit: usize) -> Vec<Order> {
        let mut orders = self.orders.orders().as_slice().to_vec();
        orders.sort_by(|a, b| b.date.cmp(&a.date));
        orders.truncate(limit);
        orders
    }

    pub fn snapshot(&self, today: NaiveDate, recent: usize) -> DashboardSnapshot {
        DashboardSnapshot {
            date: today,
            metrics: self.metrics(today),
            alerts: self.low_stock_alerts(),
            recent_orders: self.recent_orders(recent),
        }
    }
}
