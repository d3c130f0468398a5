//! Domain models for the warehouse dashboard

mod inventory;
mod label;
mod location;
mod order;
mod shipment;
mod staff;

pub use inventory::*;
pub use label::*;
pub use location::*;
pub use order::*;
pub use shipment::*;
pub use staff::*;
