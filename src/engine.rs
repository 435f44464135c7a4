//! Degree day engine
//!
//! Validates a batch once, then fetches and aggregates each location on its
//! own. A failing location is reported to [`Diagnostics`] and skipped; only
//! validation errors reach the caller.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::degree_days::heating_degree_days;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::models::{CalculationParameters, CalculationResult, Location, ResultSet};
use crate::summary::get_calculation_summary;
use crate::weather::TemperatureSource;
use crate::{GradtageError, Result};

/// Target indoor temperature in °C
pub const DEFAULT_ROOM_TEMPERATURE: f64 = 20.0;
/// Outdoor temperature in °C below which heating is needed
pub const DEFAULT_HEATING_LIMIT: f64 = 15.0;

pub struct DegreeDayEngine<S> {
    source: S,
    diagnostics: Arc<dyn Diagnostics>,
    max_concurrent_fetches: usize,
}

impl<S: TemperatureSource> DegreeDayEngine<S> {
    /// Engine reporting through `tracing`, one fetch at a time
    pub fn new(source: S) -> Self {
        Self::with_diagnostics(source, Arc::new(TracingDiagnostics))
    }

    pub fn with_diagnostics(source: S, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            source,
            diagnostics,
            max_concurrent_fetches: 1,
        }
    }

    /// Allow up to `limit` fetches in flight. Results are still inserted in
    /// input order.
    #[must_use]
    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit.max(1);
        self
    }

    /// Heating degree days for every location over `start_date..=end_date`.
    ///
    /// Dates use `YYYY-MM-DD`. Fails only on invalid input, before any fetch;
    /// locations whose data cannot be fetched or aggregated are left out.
    pub async fn calculate_for_cities(
        &self,
        locations: &[Location],
        start_date: &str,
        end_date: &str,
        room_temperature: f64,
        heating_limit: f64,
    ) -> Result<ResultSet> {
        info!("Starting calculation for {} locations", locations.len());
        info!("Period: {} to {}", start_date, end_date);
        info!(
            "Room temp: {}°C, Heating limit: {}°C",
            room_temperature, heating_limit
        );

        ensure_locations_present(locations)?;
        let params =
            CalculationParameters::parse(start_date, end_date, room_temperature, heating_limit)?;
        self.calculate(locations, &params).await
    }

    /// [`Self::calculate_for_cities`] with the default room temperature and heating limit
    pub async fn calculate_with_defaults(
        &self,
        locations: &[Location],
        start_date: &str,
        end_date: &str,
    ) -> Result<ResultSet> {
        self.calculate_for_cities(
            locations,
            start_date,
            end_date,
            DEFAULT_ROOM_TEMPERATURE,
            DEFAULT_HEATING_LIMIT,
        )
        .await
    }

    /// Run a batch with already-parsed parameters
    pub async fn calculate(
        &self,
        locations: &[Location],
        params: &CalculationParameters,
    ) -> Result<ResultSet> {
        validate_locations(locations)?;

        let outcomes: Vec<(&Location, Result<CalculationResult>)> = stream::iter(locations)
            .map(|location| async move { (location, self.process_location(location, params).await) })
            .buffered(self.max_concurrent_fetches)
            .collect()
            .await;

        let mut results = ResultSet::new();
        for (location, outcome) in outcomes {
            match outcome {
                Ok(result) => {
                    self.diagnostics.location_succeeded(&result);
                    if let Some(previous) = results.insert(result) {
                        warn!(
                            "Duplicate location name {}, replacing earlier result",
                            previous.location_name
                        );
                    }
                }
                Err(e) => self.diagnostics.location_failed(location, &e),
            }
        }

        info!(
            "Calculation completed for {}/{} locations",
            results.len(),
            locations.len()
        );
        Ok(results)
    }

    /// Formatted, ranked summary of a result set
    #[must_use]
    pub fn get_calculation_summary(&self, results: &ResultSet) -> String {
        get_calculation_summary(results)
    }

    async fn process_location(
        &self,
        location: &Location,
        params: &CalculationParameters,
    ) -> Result<CalculationResult> {
        debug!("Processing location: {}", location.name);

        let series = self
            .source
            .fetch(location, params.start_date(), params.end_date())
            .await?;

        let degree_days = heating_degree_days(
            &series.readings,
            params.room_temperature(),
            params.heating_limit(),
        );
        debug!(
            "Calculated {:.1} Kd from {} heating days",
            degree_days.total, degree_days.heating_days
        );

        Ok(CalculationResult::new(
            &location.name,
            degree_days,
            series.len(),
            params,
        ))
    }
}

fn ensure_locations_present(locations: &[Location]) -> Result<()> {
    if locations.is_empty() {
        return Err(GradtageError::validation("locations list cannot be empty"));
    }
    Ok(())
}

fn validate_locations(locations: &[Location]) -> Result<()> {
    ensure_locations_present(locations)?;

    for (index, location) in locations.iter().enumerate() {
        if location.name.trim().is_empty() {
            return Err(GradtageError::validation(format!(
                "location at position {index} has an empty name"
            )));
        }
        if !location.has_valid_latitude() {
            return Err(GradtageError::validation(format!(
                "invalid latitude for {}: {}",
                location.name, location.latitude
            )));
        }
        if !location.has_valid_longitude() {
            return Err(GradtageError::validation(format!(
                "invalid longitude for {}: {}",
                location.name, location.longitude
            )));
        }
    }
    Ok(())
}
