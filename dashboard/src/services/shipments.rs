//! Shipment service: tracking filters, the shipment -> order join and
//! creating shipments for orders ready to ship

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::seed::{seed_orders, seed_shipments};
use shared::{
    apply_filters, Carrier, FilterState, Order, OrderStatus, Region, Shipment, ShipmentStatus, ShipmentSummary,
};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::services::check_plain_text;
use crate::store::Collection;

fn check_weight(weight: &Decimal) -> Result<(), ValidationError> {
    if *weight > Decimal::ZERO {
        Ok(())
    } else {
        let mut err = ValidationError::new("range");
        err.message = Some("Weight must be greater than zero".into());
        Err(err)
    }
}

fn check_tracking_number(tracking_number: &str) -> Result<(), ValidationError> {
    let trimmed = tracking_number.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        let mut err = ValidationError::new("tracking_number");
        err.message = Some("Tracking number must be letters and digits only".into());
        return Err(err);
    }
    Ok(())
}

/// Input from the create shipment form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewShipmentInput {
    #[validate(length(min = 1, message = "Select an order to ship"))]
    pub order_id: String,
    pub carrier: Carrier,
    #[validate(length(min = 1, message = "Service type is required"))]
    pub service_type: String,
    /// Generated from the carrier prefix when absent
    #[validate(custom = "check_tracking_number")]
    pub tracking_number: Option<String>,
    #[validate(custom = "check_weight")]
    pub weight_lbs: Decimal,
    /// "City, ST"
    #[validate(length(min = 1, max = 100, message = "Destination is required"), custom = "check_plain_text")]
    pub destination: String,
    pub estimated_delivery: NaiveDate,
}

/// Shipment service over immutable shipment and order snapshots
#[derive(Debug, Clone)]
pub struct ShipmentService {
    shipments: Collection<Shipment>,
    orders: Collection<Order>,
}

/// Row of the tracking table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingRow {
    pub id: String,
    pub order_id: String,
    pub carrier: String,
    pub tracking_number: String,
    pub status: ShipmentStatus,
    pub region: Option<Region>,
}

impl ShipmentService {
    /// Create a new ShipmentService instance
    pub fn new(shipments: Collection<Shipment>, orders: Collection<Order>) -> Self {
        Self { shipments, orders }
    }

    pub fn seeded() -> Self {
        Self::new(Collection::new(seed_shipments()), Collection::new(seed_orders()))
    }

    pub fn shipments(&self) -> &Collection<Shipment> {
        &self.shipments
    }

    /// Filter keys: `status`, `carrier`, `destination` (region), plus any shipment field
    pub fn list(&self, filter: &FilterState) -> Vec<Shipment> {
        let shipments = apply_filters(self.shipments.as_slice(), filter);
        tracing::debug!(matched = shipments.len(), total = self.shipments.len(), "Listed shipments");
        shipments
    }

    pub fn tracking(&self, filter: &FilterState) -> Vec<TrackingRow> {
        self.list(filter)
            .into_iter()
            .map(|s| TrackingRow {
                region: s.region(),
                carrier: s.carrier.to_string(),
                id: s.id,
                order_id: s.order_id,
                tracking_number: s.tracking_number,
                status: s.status,
            })
            .collect()
    }

    pub fn summary(&self, filter: &FilterState) -> ShipmentSummary {
        ShipmentSummary::from_shipments(&self.list(filter))
    }

    pub fn get(&self, id: &str) -> AppResult<&Shipment> {
        let id = id.trim();
        self.shipments
            .find(|s| s.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| AppError::NotFound(format!("Shipment {}", id)))
    }

    /// Originating order; informational, so a dangling link is `None`
    pub fn order_for(&self, shipment: &Shipment) -> Option<&Order> {
        self.orders.find(|o| o.id == shipment.order_id)
    }

    /// Next id in the `SHP-<nnnnnn>` sequence
    pub fn next_shipment_id(&self) -> String {
        let last = self
            .shipments
            .iter()
            .filter_map(|s| s.id.strip_prefix("SHP-")?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        format!("SHP-{:06}", last + 1)
    }

    /// Create a shipment for an order that is ready to ship.
    ///
    /// The new shipment starts out `Preparing`; the order itself is left
    /// alone until the parcel is handed to the carrier.
    pub fn create_from_order(&self, input: NewShipmentInput, today: NaiveDate) -> AppResult<(Self, Shipment)> {
        input.validate()?;

        let order_id = input.order_id.trim();
        let order = self
            .orders
            .find(|o| o.id.eq_ignore_ascii_case(order_id))
            .ok_or_else(|| AppError::NotFound(format!("Order {}", order_id)))?;
        if order.status != OrderStatus::ReadyToShip {
            tracing::warn!(order = %order.id, status = %order.status, "Rejected shipment for order not ready to ship");
            return Err(AppError::InvalidStateTransition(format!(
                "Order {} is {}, not {}",
                order.id,
                order.status,
                OrderStatus::ReadyToShip
            )));
        }
        if self.shipments.contains(|s| s.order_id == order.id) {
            return Err(AppError::DuplicateEntry("order_id".to_string()));
        }

        let service_type = input.carrier.service(&input.service_type).ok_or_else(|| {
            AppError::validation(
                "service_type",
                format!("{} does not offer {}", input.carrier, input.service_type.trim()),
            )
        })?;
        if input.estimated_delivery < today {
            return Err(AppError::validation(
                "estimated_delivery",
                "Estimated delivery cannot be in the past",
            ));
        }

        let tracking_number = match input.tracking_number.as_deref().map(str::trim) {
            Some(number) => number.to_ascii_uppercase(),
            None => generate_tracking_number(input.carrier),
        };
        if self.shipments.contains(|s| s.tracking_number == tracking_number) {
            return Err(AppError::DuplicateEntry("tracking_number".to_string()));
        }

        let shipment = Shipment {
            id: self.next_shipment_id(),
            order_id: order.id.clone(),
            customer: order.customer.clone(),
            destination: input.destination.trim().to_string(),
            carrier: input.carrier,
            service_type: Some(service_type.to_string()),
            tracking_number,
            status: ShipmentStatus::Preparing,
            items: order.items,
            weight_lbs: input.weight_lbs,
            shipped_date: None,
            estimated_delivery: input.estimated_delivery,
            actual_delivery: None,
        };

        tracing::info!(shipment = %shipment.id, order = %shipment.order_id, carrier = %shipment.carrier, "Shipment created");
        let service = Self {
            shipments: self.shipments.with_pushed(shipment.clone()),
            orders: self.orders.clone(),
        };
        Ok((service, shipment))
    }

    pub fn by_tracking_number(&self, tracking_number: &str) -> AppResult<&Shipment> {
        let tracking_number = tracking_number.trim();
        self.shipments
            .find(|s| s.tracking_number == tracking_number)
            .ok_or_else(|| AppError::NotFound(format!("Shipment with tracking number {}", tracking_number)))
    }
}

/// Carrier prefix followed by ten digits
fn generate_tracking_number(carrier: Carrier) -> String {
    let digits = Uuid::new_v4().as_u128() % 10_000_000_000;
    format!("{}{:010}", carrier.tracking_prefix(), digits)
}
