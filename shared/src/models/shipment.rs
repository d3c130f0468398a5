//! Outbound shipment models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Labeled;

/// A shipment created from an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: String,
    /// Display-time link to the originating order
    pub order_id: String,
    pub customer: String,
    /// "City, ST"
    pub destination: String,
    pub carrier: Carrier,
    /// Carrier service level, e.g. "Ground"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    pub tracking_number: String,
    pub status: ShipmentStatus,
    pub items: u32,
    pub weight_lbs: Decimal,
    pub shipped_date: Option<NaiveDate>,
    pub estimated_delivery: NaiveDate,
    pub actual_delivery: Option<NaiveDate>,
}

impl Shipment {
    /// Two-letter state code from the destination, if present
    pub fn state_code(&self) -> Option<&str> {
        let (_, state) = self.destination.rsplit_once(',')?;
        let state = state.trim();
        (state.len() == 2 && state.chars().all(|c| c.is_ascii_alphabetic())).then_some(state)
    }

    /// Destination region used by the region filter
    pub fn region(&self) -> Option<Region> {
        self.state_code().and_then(Region::for_state)
    }

    /// Handed to the carrier and not yet delivered
    pub fn is_in_flight(&self) -> bool {
        matches!(self.status, ShipmentStatus::InTransit | ShipmentStatus::OutForDelivery)
    }
}

/// Shipment tracking status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Preparing,
    ReadyToShip,
    InTransit,
    OutForDelivery,
    Delivered,
    Exception,
}

impl Labeled for ShipmentStatus {
    const KIND: &'static str = "shipment status";
    const ALL: &'static [Self] = &[
        ShipmentStatus::Preparing,
        ShipmentStatus::ReadyToShip,
        ShipmentStatus::InTransit,
        ShipmentStatus::OutForDelivery,
        ShipmentStatus::Delivered,
        ShipmentStatus::Exception,
    ];

    fn label(&self) -> &'static str {
        match self {
            ShipmentStatus::Preparing => "Preparing",
            ShipmentStatus::ReadyToShip => "Ready to Ship",
            ShipmentStatus::InTransit => "In Transit",
            ShipmentStatus::OutForDelivery => "Out for Delivery",
            ShipmentStatus::Delivered => "Delivered",
            ShipmentStatus::Exception => "Exception",
        }
    }
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parcel carriers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Carrier {
    #[serde(rename = "fedex")]
    FedEx,
    Ups,
    Dhl,
    Usps,
}

impl Carrier {
    /// Service levels offered by the carrier
    pub fn services(&self) -> &'static [&'static str] {
        match self {
            Carrier::FedEx => &["Ground", "Express", "Overnight"],
            Carrier::Ups => &["Ground", "Next Day Air", "2nd Day Air"],
            Carrier::Dhl => &["Express", "Ground"],
            Carrier::Usps => &["Priority", "Express", "Ground"],
        }
    }

    /// Canonical spelling of a service level, matched case-insensitively
    pub fn service(&self, raw: &str) -> Option<&'static str> {
        let raw = raw.trim();
        self.services().iter().copied().find(|s| s.eq_ignore_ascii_case(raw))
    }

    /// Prefix of generated tracking numbers
    pub fn tracking_prefix(&self) -> &'static str {
        match self {
            Carrier::FedEx => "FEDEX",
            Carrier::Ups => "UPS",
            Carrier::Dhl => "DHL",
            Carrier::Usps => "USPS",
        }
    }
}

impl Labeled for Carrier {
    const KIND: &'static str = "carrier";
    const ALL: &'static [Self] = &[Carrier::FedEx, Carrier::Ups, Carrier::Dhl, Carrier::Usps];

    fn label(&self) -> &'static str {
        match self {
            Carrier::FedEx => "FedEx",
            Carrier::Ups => "UPS",
            Carrier::Dhl => "DHL",
            Carrier::Usps => "USPS",
        }
    }
}

impl std::fmt::Display for Carrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// US destination regions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Northeast,
    Southeast,
    Midwest,
    Southwest,
    West,
}

impl Region {
    /// Region for a two-letter state code (case-insensitive)
    pub fn for_state(code: &str) -> Option<Region> {
        let code = code.to_ascii_uppercase();
        let region = match code.as_str() {
            "CT" | "DE" | "MA" | "MD" | "ME" | "NH" | "NJ" | "NY" | "PA" | "RI" | "VT" | "DC" => {
                Region::Northeast
            }
            "AL" | "AR" | "FL" | "GA" | "KY" | "LA" | "MS" | "NC" | "SC" | "TN" | "VA" | "WV" => {
                Region::Southeast
            }
            "IA" | "IL" | "IN" | "KS" | "MI" | "MN" | "MO" | "ND" | "NE" | "OH" | "SD" | "WI" => {
                Region::Midwest
            }
            "AZ" | "NM" | "OK" | "TX" => Region::Southwest,
            "AK" | "CA" | "CO" | "HI" | "ID" | "MT" | "NV" | "OR" | "UT" | "WA" | "WY" => Region::West,
            _ => return None,
        };
        Some(region)
    }
}

impl Labeled for Region {
    const KIND: &'static str = "region";
    const ALL: &'static [Self] = &[
        Region::Northeast,
        Region::Southeast,
        Region::Midwest,
        Region::Southwest,
        Region::West,
    ];

    fn label(&self) -> &'static str {
        match self {
            Region::Northeast => "Northeast",
            Region::Southeast => "Southeast",
            Region::Midwest => "Midwest",
            Region::Southwest => "Southwest",
            Region::West => "West",
        }
    }
}
