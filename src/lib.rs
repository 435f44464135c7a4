//! `Gradtage` - Heating degree day (Gradtagszahl) calculation per VDI 2067
//!
//! This library fetches daily mean outdoor temperatures for a set of locations,
//! aggregates them into heating degree days and renders a ranked summary.

pub mod config;
pub mod degree_days;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod models;
pub mod summary;
pub mod weather;

// Re-export core types for public API
pub use config::GradtageConfig;
pub use degree_days::{HeatingDegreeDays, heating_degree_days};
pub use diagnostics::{Diagnostics, LocationFailure, RecordingDiagnostics, TracingDiagnostics};
pub use engine::{DEFAULT_HEATING_LIMIT, DEFAULT_ROOM_TEMPERATURE, DegreeDayEngine};
pub use error::GradtageError;
pub use fetch::{HttpJsonFetcher, JsonFetcher};
pub use models::{CalculationParameters, CalculationResult, Location, ResultSet, TemperatureSeries};
pub use summary::get_calculation_summary;
pub use weather::{TemperatureSource, open_meteo::OpenMeteoArchive};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, GradtageError>;
