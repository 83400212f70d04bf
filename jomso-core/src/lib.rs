//! Core types and service wiring for the jomso nearest-bin locator.

/// Haversine distances and nearest-bin selection.
pub mod geo;
/// Domain models and identifiers shared by all sources.
pub mod model;
/// Registry of bin sources.
pub mod plugin;
/// Traits describing the bin source and location interfaces.
pub mod ports;
/// High-level service facade used by clients.
pub mod service;
/// JSON feed records and their conversion into bins.
pub mod wire;

pub use geo::*;
pub use model::*;
pub use plugin::*;
pub use ports::*;
pub use service::*;
