//! Customer order models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Labeled;

/// A customer order awaiting fulfillment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer: String,
    pub customer_email: String,
    /// Number of units on the order
    pub items: u32,
    pub total: Decimal,
    pub status: OrderStatus,
    pub priority: Priority,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub assigned_to: String,
}

impl Order {
    /// Open orders still need warehouse work
    pub fn is_open(&self) -> bool {
        matches!(
            self.status,
            OrderStatus::Pending | OrderStatus::Processing | OrderStatus::ReadyToShip
        )
    }

    /// Open and past its due date
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_open() && self.due_date < today
    }
}

/// A customer the order form can bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Order fulfillment status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    ReadyToShip,
    Shipped,
    Delivered,
    Cancelled,
}

impl Labeled for OrderStatus {
    const KIND: &'static str = "order status";
    const ALL: &'static [Self] = &[
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::ReadyToShip,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::ReadyToShip => "Ready to Ship",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Work priority shared by orders
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Labeled for Priority {
    const KIND: &'static str = "priority";
    const ALL: &'static [Self] = &[Priority::Low, Priority::Medium, Priority::High];

    fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_parsing() {
        assert_eq!(OrderStatus::parse_label("Ready to Ship").unwrap(), OrderStatus::ReadyToShip);
        assert_eq!(OrderStatus::parse_label("ready-to-ship").unwrap(), OrderStatus::ReadyToShip);
        assert_eq!(OrderStatus::parse_label("ready_to_ship").unwrap(), OrderStatus::ReadyToShip);
        assert_eq!(OrderStatus::parse_label("CANCELLED").unwrap(), OrderStatus::Cancelled);
        assert!(OrderStatus::parse_label("lost").is_err());
    }

    #[test]
    fn test_order_status_serde_name() {
        let json = serde_json::to_string(&OrderStatus::ReadyToShip).unwrap();
        assert_eq!(json, "\"ready_to_ship\"");
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }
}
