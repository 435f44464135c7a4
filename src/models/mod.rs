//! Data models for the degree day calculator
//!
//! This module contains the core domain models organized by concern:
//! - Location: named geographic coordinates
//! - Parameters: validated period and temperature thresholds
//! - Series: daily mean temperatures fetched for one location
//! - Result: per-location results and the keyed result set

pub mod location;
pub mod parameters;
pub mod result;
pub mod series;

// Re-export all public types for convenient access
pub use location::Location;
pub use parameters::CalculationParameters;
pub use result::{CalculationResult, ResultSet};
pub use series::TemperatureSeries;
