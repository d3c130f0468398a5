//! Inventory item model and stock classification

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Location;
use crate::types::Labeled;

/// A stocked product in the warehouse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Stock-keeping unit, unique per item
    pub sku: String,
    pub name: String,
    pub category: String,
    pub stock: u32,
    pub min_stock: u32,
    pub location: Location,
    pub unit_value: Decimal,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
}

impl InventoryItem {
    /// Status is always derived, never stored
    pub fn status(&self) -> StockStatus {
        classify_stock(self.stock, self.min_stock)
    }

    /// Value of the units on hand
    pub fn total_value(&self) -> Decimal {
        Decimal::from(self.stock) * self.unit_value
    }

    pub fn needs_restock(&self) -> bool {
        self.status() != StockStatus::InStock
    }
}

/// Stock level classification shown on every status badge
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl Labeled for StockStatus {
    const KIND: &'static str = "stock status";
    const ALL: &'static [Self] = &[StockStatus::InStock, StockStatus::LowStock, StockStatus::OutOfStock];

    fn label(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classify a stock level against its minimum.
///
/// Zero stock dominates; otherwise anything at or below the minimum is low.
pub fn classify_stock(stock: u32, min_stock: u32) -> StockStatus {
    match stock {
        0 => StockStatus::OutOfStock,
        s if s <= min_stock => StockStatus::LowStock,
        _ => StockStatus::InStock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_examples() {
        assert_eq!(classify_stock(0, 100), StockStatus::OutOfStock);
        assert_eq!(classify_stock(12, 25), StockStatus::LowStock);
        assert_eq!(classify_stock(847, 100), StockStatus::InStock);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify_stock(0, 0), StockStatus::OutOfStock);
        assert_eq!(classify_stock(25, 25), StockStatus::LowStock);
        assert_eq!(classify_stock(26, 25), StockStatus::InStock);
        assert_eq!(classify_stock(1, 0), StockStatus::InStock);
    }

    #[test]
    fn test_stock_status_labels() {
        assert_eq!(StockStatus::OutOfStock.to_string(), "Out of Stock");
        assert_eq!(StockStatus::LowStock.slug(), "low-stock");
        assert_eq!(StockStatus::parse_label("in_stock").unwrap(), StockStatus::InStock);
        assert_eq!(StockStatus::parse_label("Out of Stock").unwrap(), StockStatus::OutOfStock);
        assert!(StockStatus::parse_label("backordered").is_err());
    }

    proptest! {
        #[test]
        fn prop_zero_stock_is_always_out(min in 0u32..100_000) {
            prop_assert_eq!(classify_stock(0, min), StockStatus::OutOfStock);
        }

        #[test]
        fn prop_low_stock_iff_positive_and_at_or_below_min(stock in 0u32..10_000, min in 0u32..10_000) {
            let status = classify_stock(stock, min);
            prop_assert_eq!(status == StockStatus::LowStock, stock > 0 && stock <= min);
            prop_assert_eq!(status == StockStatus::InStock, stock > min);
        }
    }
}
