//! Shared domain core for the warehouse dashboard
//!
//! Models, the location model, stock classification, filtering, summaries
//! and label payloads. Used by the dashboard services and the WASM bindings;
//! contains no I/O.

pub mod error;
pub mod filter;
pub mod models;
pub mod seed;
pub mod summary;
pub mod types;
pub mod validation;
pub mod workflow;

pub use error::*;
pub use filter::*;
pub use models::*;
pub use summary::*;
pub use types::*;
pub use validation::*;
pub use workflow::*;
