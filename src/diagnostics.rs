//! Per-location outcome reporting for the degree day engine
//!
//! The engine never logs through process-wide state of its own; it reports
//! every processed location to the [`Diagnostics`] it was built with.

use std::sync::Mutex;

use tracing::{error, info};

use crate::GradtageError;
use crate::models::{CalculationResult, Location};

/// Receiver of per-location outcomes
pub trait Diagnostics: Send + Sync {
    fn location_succeeded(&self, result: &CalculationResult);
    fn location_failed(&self, location: &Location, error: &GradtageError);
}

/// Emits outcomes as `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn location_succeeded(&self, result: &CalculationResult) {
        info!(
            location = %result.location_name,
            "{}: {:.1} Kd ({} heating days)",
            result.location_name,
            result.total_degree_days,
            result.heating_day_count
        );
    }

    fn location_failed(&self, location: &Location, error: &GradtageError) {
        error!(
            location = %location.name,
            retryable = error.is_retryable(),
            "Error processing {}: {}",
            location.name,
            error
        );
    }
}

/// A location that produced no result, with the reason
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFailure {
    pub location_name: String,
    pub message: String,
    pub retryable: bool,
}

/// Keeps failures in memory so callers can report missing locations,
/// and forwards everything to `tracing` as well
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    failures: Mutex<Vec<LocationFailure>>,
    successes: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Failures recorded so far, in reporting order
    #[must_use]
    pub fn failures(&self) -> Vec<LocationFailure> {
        self.failures
            .lock()
            .map(|failures| failures.clone())
            .unwrap_or_default()
    }

    /// Names of locations that succeeded, in reporting order
    #[must_use]
    pub fn successes(&self) -> Vec<String> {
        self.successes
            .lock()
            .map(|names| names.clone())
            .unwrap_or_default()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn location_succeeded(&self, result: &CalculationResult) {
        TracingDiagnostics.location_succeeded(result);
        if let Ok(mut successes) = self.successes.lock() {
            successes.push(result.location_name.clone());
        }
    }

    fn location_failed(&self, location: &Location, error: &GradtageError) {
        TracingDiagnostics.location_failed(location, error);
        if let Ok(mut failures) = self.failures.lock() {
            failures.push(LocationFailure {
                location_name: location.name.clone(),
                message: error.to_string(),
                retryable: error.is_retryable(),
            });
        }
    }
}
