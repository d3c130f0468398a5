//! Reference dataset the dashboard starts from
//!
//! Timestamps are relative to [`SEED_ANCHOR`] so the data is reproducible.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::models::{
    Carrier, Customer, Department, EmploymentStatus, InventoryItem, Location, Order, OrderStatus, Performance, Priority,
    Shipment, ShipmentStatus, StaffMember,
};

/// The moment the seed data describes: 2024-12-27 12:00 UTC
pub fn seed_anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, 27, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

fn hours_ago(hours: i64) -> DateTime<Utc> {
    seed_anchor() - Duration::hours(hours)
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn cents(amount: i64) -> Decimal {
    Decimal::new(amount, 2)
}

#[allow(clippy::too_many_arguments)]
fn item(
    sku: &str,
    name: &str,
    category: &str,
    stock: u32,
    min_stock: u32,
    location: Location,
    unit_cents: i64,
    updated_hours_ago: i64,
) -> InventoryItem {
    InventoryItem {
        sku: sku.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        stock,
        min_stock,
        location,
        unit_value: cents(unit_cents),
        last_updated: hours_ago(updated_hours_ago),
        supplier: None,
    }
}

pub fn seed_inventory() -> Vec<InventoryItem> {
    vec![
        item("WPA-001", "Widget Pro A", "Electronics", 847, 100, Location::fixed('A', 1, 'B', 2), 2599, 2),
        item("CX-205", "Component X", "Components", 623, 50, Location::fixed('B', 3, 'C', 1), 1250, 4),
        item("PK-150", "Premium Kit", "Kits", 12, 25, Location::fixed('C', 2, 'D', 4), 8999, 1),
        item("WB-300", "Widget Basic", "Electronics", 0, 75, Location::fixed('A', 2, 'B', 1), 1599, 6),
        item("AC-450", "Accessory Pack", "Accessories", 234, 30, Location::fixed('D', 1, 'E', 2), 875, 3),
    ]
}

#[allow(clippy::too_many_arguments)]
fn order(
    id: &str,
    customer: &str,
    email: &str,
    items: u32,
    total_cents: i64,
    status: OrderStatus,
    priority: Priority,
    date: NaiveDate,
    due_date: NaiveDate,
    assigned_to: &str,
) -> Order {
    Order {
        id: id.to_string(),
        customer: customer.to_string(),
        customer_email: email.to_string(),
        items,
        total: cents(total_cents),
        status,
        priority,
        date,
        due_date,
        assigned_to: assigned_to.to_string(),
    }
}

pub fn seed_orders() -> Vec<Order> {
    use OrderStatus::*;
    use Priority::*;

    vec![
        order("ORD-12847", "Acme Corp", "orders@acme.com", 25, 284750, Processing, High, day(2024, 12, 27), day(2024, 12, 29), "John Smith"),
        order("ORD-12846", "TechStart Inc", "procurement@techstart.com", 12, 124500, ReadyToShip, Medium, day(2024, 12, 27), day(2024, 12, 28), "Sarah Johnson"),
        order("ORD-12845", "Global Solutions", "supply@globalsol.com", 8, 56780, Shipped, Low, day(2024, 12, 26), day(2024, 12, 27), "Mike Davis"),
        order("ORD-12844", "Innovation Labs", "orders@innovlabs.com", 45, 412375, Pending, High, day(2024, 12, 26), day(2024, 12, 30), "Lisa Chen"),
        order("ORD-12843", "BuildCorp", "materials@buildcorp.com", 18, 187625, Cancelled, Medium, day(2024, 12, 25), day(2024, 12, 28), "Tom Wilson"),
        order("ORD-12848", "DataFlow Systems", "orders@dataflow.com", 32, 345690, Processing, Medium, day(2024, 12, 27), day(2024, 12, 30), "Emma Wilson"),
        order("ORD-12849", "CloudTech Solutions", "procurement@cloudtech.com", 15, 178925, ReadyToShip, High, day(2024, 12, 27), day(2024, 12, 28), "Alex Chen"),
        order("ORD-12850", "NextGen Industries", "supply@nextgen.com", 28, 213460, Pending, Low, day(2024, 12, 27), day(2024, 12, 31), "Ryan Martinez"),
        order("ORD-12851", "FutureTech Corp", "orders@futuretech.com", 19, 156740, Shipped, Medium, day(2024, 12, 26), day(2024, 12, 28), "Sophie Davis"),
    ]
}

pub fn seed_shipments() -> Vec<Shipment> {
    vec![
        Shipment {
            id: "SHP-001247".to_string(),
            order_id: "ORD-12847".to_string(),
            customer: "Acme Corp".to_string(),
            destination: "New York, NY".to_string(),
            carrier: Carrier::FedEx,
            service_type: None,
            tracking_number: "1234567890123".to_string(),
            status: ShipmentStatus::InTransit,
            items: 25,
            weight_lbs: Decimal::new(452, 1),
            shipped_date: Some(day(2024, 12, 27)),
            estimated_delivery: day(2024, 12, 29),
            actual_delivery: None,
        },
        Shipment {
            id: "SHP-001246".to_string(),
            order_id: "ORD-12846".to_string(),
            customer: "TechStart Inc".to_string(),
            destination: "San Francisco, CA".to_string(),
            carrier: Carrier::Ups,
            service_type: None,
            tracking_number: "9876543210987".to_string(),
            status: ShipmentStatus::Delivered,
            items: 12,
            weight_lbs: Decimal::new(238, 1),
            shipped_date: Some(day(2024, 12, 26)),
            estimated_delivery: day(2024, 12, 28),
            actual_delivery: Some(day(2024, 12, 28)),
        },
        Shipment {
            id: "SHP-001245".to_string(),
            order_id: "ORD-12845".to_string(),
            customer: "Global Solutions".to_string(),
            destination: "Chicago, IL".to_string(),
            carrier: Carrier::Dhl,
            service_type: None,
            tracking_number: "5555666677778".to_string(),
            status: ShipmentStatus::Preparing,
            items: 8,
            weight_lbs: Decimal::new(125, 1),
            shipped_date: None,
            estimated_delivery: day(2024, 12, 30),
            actual_delivery: None,
        },
        Shipment {
            id: "SHP-001244".to_string(),
            order_id: "ORD-12844".to_string(),
            customer: "Innovation Labs".to_string(),
            destination: "Austin, TX".to_string(),
            carrier: Carrier::FedEx,
            service_type: None,
            tracking_number: "1111222233334".to_string(),
            status: ShipmentStatus::OutForDelivery,
            items: 45,
            weight_lbs: Decimal::new(789, 1),
            shipped_date: Some(day(2024, 12, 25)),
            estimated_delivery: day(2024, 12, 27),
            actual_delivery: None,
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn staff_member(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    department: Department,
    position: &str,
    status: EmploymentStatus,
    hire_date: NaiveDate,
    performance: Performance,
) -> StaffMember {
    StaffMember {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        department,
        position: position.to_string(),
        status,
        hire_date,
        performance,
    }
}

pub fn seed_staff() -> Vec<StaffMember> {
    use Department::*;
    use EmploymentStatus::*;
    use Performance::*;

    vec![
        staff_member("EMP-001", "John Smith", "john.smith@quantus.com", "+1 (555) 123-4567", Warehouse, "Warehouse Manager", Active, day(2022, 1, 15), Excellent),
        staff_member("EMP-002", "Sarah Johnson", "sarah.johnson@quantus.com", "+1 (555) 234-5678", Operations, "Operations Supervisor", Active, day(2022, 3, 22), Good),
        staff_member("EMP-003", "Mike Davis", "mike.davis@quantus.com", "+1 (555) 345-6789", Shipping, "Shipping Coordinator", Active, day(2023, 6, 10), Good),
        staff_member("EMP-004", "Lisa Chen", "lisa.chen@quantus.com", "+1 (555) 456-7890", QualityControl, "QC Inspector", OnLeave, day(2021, 9, 5), Excellent),
        staff_member("EMP-005", "Tom Wilson", "tom.wilson@quantus.com", "+1 (555) 567-8901", Warehouse, "Picker/Packer", Active, day(2023, 11, 18), Average),
    ]
}

/// Customer directory searched by the new order form
pub fn seed_customers() -> Vec<Customer> {
    [
        ("1", "Acme Corp", "orders@acme.com", "+1 (555) 123-4567"),
        ("2", "TechStart Inc", "procurement@techstart.com", "+1 (555) 234-5678"),
        ("3", "Global Solutions", "supply@globalsol.com", "+1 (555) 345-6789"),
        ("4", "Innovation Labs", "orders@innovlabs.com", "+1 (555) 456-7890"),
    ]
    .into_iter()
    .map(|(id, name, email, phone)| Customer {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
    })
    .collect()
}

/// Barcode to SKU table used by the scanner
pub fn seed_barcodes() -> Vec<(String, String)> {
    [
        ("123456789012", "WPA-001"),
        ("234567890123", "CX-205"),
        ("345678901234", "PK-150"),
    ]
    .into_iter()
    .map(|(code, sku)| (code.to_string(), sku.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let skus: HashSet<_> = seed_inventory().into_iter().map(|i| i.sku).collect();
        assert_eq!(skus.len(), 5);

        let orders: HashSet<_> = seed_orders().into_iter().map(|o| o.id).collect();
        assert_eq!(orders.len(), 9);
    }

    #[test]
    fn test_seed_timestamps_are_relative_to_anchor() {
        let items = seed_inventory();
        assert_eq!(seed_anchor() - items[0].last_updated, Duration::hours(2));
        assert!(items.iter().all(|i| i.last_updated < seed_anchor()));
    }

    #[test]
    fn test_shipments_reference_seeded_orders() {
        let orders: HashSet<_> = seed_orders().into_iter().map(|o| o.id).collect();
        assert!(seed_shipments().iter().all(|s| orders.contains(&s.order_id)));
    }

    #[test]
    fn test_barcodes_reference_seeded_items() {
        let skus: HashSet<_> = seed_inventory().into_iter().map(|i| i.sku).collect();
        assert!(seed_barcodes().iter().all(|(_, sku)| skus.contains(sku)));
    }
}
