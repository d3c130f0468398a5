//! Aggregate summaries over the current view of a collection
//!
//! Every summary is recomputed from the slice it is given; nothing here
//! caches or stores a total.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    Carrier, Department, EmploymentStatus, InventoryItem, Order, OrderStatus, Performance, Priority, Shipment,
    ShipmentStatus, StaffMember, StockStatus,
};

/// Count per key, in key order. Keys that never occur are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusBreakdown<K: Ord> {
    counts: BTreeMap<K, usize>,
}

impl<K: Ord> Default for StatusBreakdown<K> {
    fn default() -> Self {
        Self { counts: BTreeMap::new() }
    }
}

impl<K: Ord + Copy> StatusBreakdown<K> {
    /// Count for `key`, zero when absent
    pub fn get(&self, key: K) -> usize {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, usize)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn bump(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }
}

impl<K: Ord + Copy> FromIterator<K> for StatusBreakdown<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut breakdown = Self::default();
        for key in iter {
            breakdown.bump(key);
        }
        breakdown
    }
}

/// A record with a closed status enumeration
pub trait HasStatus {
    type Status: Ord + Copy;

    fn current_status(&self) -> Self::Status;
}

impl HasStatus for InventoryItem {
    type Status = StockStatus;

    fn current_status(&self) -> StockStatus {
        self.status()
    }
}

impl HasStatus for Order {
    type Status = OrderStatus;

    fn current_status(&self) -> OrderStatus {
        self.status
    }
}

impl HasStatus for Shipment {
    type Status = ShipmentStatus;

    fn current_status(&self) -> ShipmentStatus {
        self.status
    }
}

impl HasStatus for StaffMember {
    type Status = EmploymentStatus;

    fn current_status(&self) -> EmploymentStatus {
        self.status
    }
}

pub fn count<T>(items: &[T]) -> usize {
    items.len()
}

pub fn count_by<T, K, F>(items: &[T], key: F) -> StatusBreakdown<K>
where
    K: Ord + Copy,
    F: Fn(&T) -> K,
{
    items.iter().map(key).collect()
}

pub fn count_by_status<T: HasStatus>(items: &[T]) -> StatusBreakdown<T::Status> {
    count_by(items, HasStatus::current_status)
}

pub fn sum_by<T, F>(items: &[T], value: F) -> Decimal
where
    F: Fn(&T) -> Decimal,
{
    items.iter().map(value).sum()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub items: usize,
    pub units: u64,
    pub by_status: StatusBreakdown<StockStatus>,
    pub low_stock: usize,
    pub out_of_stock: usize,
    /// Sum of stock x unit value
    pub total_value: Decimal,
}

impl InventorySummary {
    pub fn from_items(items: &[InventoryItem]) -> Self {
        let by_status = count_by_status(items);
        Self {
            items: count(items),
            units: items.iter().map(|i| u64::from(i.stock)).sum(),
            low_stock: by_status.get(StockStatus::LowStock),
            out_of_stock: by_status.get(StockStatus::OutOfStock),
            by_status,
            total_value: sum_by(items, InventoryItem::total_value),
        }
    }

    /// Items needing attention on the alert banner
    pub fn alerts(&self) -> usize {
        self.low_stock + self.out_of_stock
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub orders: usize,
    pub by_status: StatusBreakdown<OrderStatus>,
    pub by_priority: StatusBreakdown<Priority>,
    pub total_value: Decimal,
    pub total_units: u64,
}

impl OrderSummary {
    pub fn from_orders(orders: &[Order]) -> Self {
        Self {
            orders: count(orders),
            by_status: count_by_status(orders),
            by_priority: count_by(orders, |o| o.priority),
            total_value: sum_by(orders, |o| o.total),
            total_units: orders.iter().map(|o| u64::from(o.items)).sum(),
        }
    }

    pub fn open(&self) -> usize {
        self.by_status.get(OrderStatus::Pending)
            + self.by_status.get(OrderStatus::Processing)
            + self.by_status.get(OrderStatus::ReadyToShip)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentSummary {
    pub shipments: usize,
    pub by_status: StatusBreakdown<ShipmentStatus>,
    pub by_carrier: StatusBreakdown<Carrier>,
    pub total_weight_lbs: Decimal,
    /// In transit or out for delivery
    pub in_flight: usize,
}

impl ShipmentSummary {
    pub fn from_shipments(shipments: &[Shipment]) -> Self {
        Self {
            shipments: count(shipments),
            by_status: count_by_status(shipments),
            by_carrier: count_by(shipments, |s| s.carrier),
            total_weight_lbs: sum_by(shipments, |s| s.weight_lbs),
            in_flight: shipments.iter().filter(|s| s.is_in_flight()).count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffSummary {
    pub staff: usize,
    pub by_status: StatusBreakdown<EmploymentStatus>,
    pub by_department: StatusBreakdown<Department>,
    pub by_performance: StatusBreakdown<Performance>,
}

impl StaffSummary {
    pub fn from_staff(staff: &[StaffMember]) -> Self {
        Self {
            staff: count(staff),
            by_status: count_by_status(staff),
            by_department: count_by(staff, |s| s.department),
            by_performance: count_by(staff, |s| s.performance),
        }
    }

    pub fn active(&self) -> usize {
        self.by_status.get(EmploymentStatus::Active)
    }
}
