//! Open-Meteo historical weather archive
//!
//! Daily mean temperatures come from the `archive` endpoint:
//! `https://archive-api.open-meteo.com/v1/archive?latitude=..&longitude=..&start_date=..&end_date=..&daily=temperature_2m_mean&timezone=auto`

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::TemperatureSource;
use crate::config::ArchiveConfig;
use crate::fetch::JsonFetcher;
use crate::models::parameters::DATE_FORMAT;
use crate::models::{Location, TemperatureSeries};
use crate::{GradtageError, Result};

const ARCHIVE_ENDPOINT: &str = "archive";
const DAILY_MEAN_TEMPERATURE: &str = "temperature_2m_mean";

/// Archive response, reduced to what the calculation needs
#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    daily: Option<DailyData>,
}

#[derive(Debug, Deserialize)]
struct DailyData {
    #[serde(default)]
    time: Vec<String>,
    #[serde(rename = "temperature_2m_mean")]
    temperature_mean: Option<Vec<Option<f64>>>,
}

/// [`TemperatureSource`] backed by the Open-Meteo archive API
pub struct OpenMeteoArchive<F> {
    fetcher: F,
    timeout: Duration,
}

impl<F: JsonFetcher> OpenMeteoArchive<F> {
    #[must_use]
    pub fn new(fetcher: F, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }

    #[must_use]
    pub fn from_config(fetcher: F, config: &ArchiveConfig) -> Self {
        Self::new(fetcher, Duration::from_secs(config.timeout_seconds.into()))
    }

    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    fn query(location: &Location, start_date: NaiveDate, end_date: NaiveDate) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("start_date", start_date.format(DATE_FORMAT).to_string()),
            ("end_date", end_date.format(DATE_FORMAT).to_string()),
            ("daily", DAILY_MEAN_TEMPERATURE.to_string()),
            ("timezone", "auto".to_string()),
        ]
    }
}

/// Turn an untyped archive payload into a series.
///
/// The only place where the response shape is checked.
fn parse_archive_response(
    payload: Value,
    location: &Location,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<TemperatureSeries> {
    let response: ArchiveResponse = serde_json::from_value(payload).map_err(|e| {
        GradtageError::data_format(format!("Invalid archive response for {}: {e}", location.name))
    })?;

    let daily = response.daily.ok_or_else(|| {
        GradtageError::data_format(format!(
            "Archive response for {} has no daily data",
            location.name
        ))
    })?;

    let temperatures = daily.temperature_mean.ok_or_else(|| {
        GradtageError::data_format(format!(
            "Archive response for {} lacks {DAILY_MEAN_TEMPERATURE}",
            location.name
        ))
    })?;

    if !daily.time.is_empty() && daily.time.len() != temperatures.len() {
        warn!(
            "Archive returned {} dates but {} temperatures for {}",
            daily.time.len(),
            temperatures.len(),
            location.name
        );
    }

    TemperatureSeries::from_raw(&location.name, start_date, end_date, temperatures)
}

#[async_trait]
impl<F: JsonFetcher> TemperatureSource for OpenMeteoArchive<F> {
    #[instrument(skip(self, location), fields(location = %location.name))]
    async fn fetch(
        &self,
        location: &Location,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<TemperatureSeries> {
        debug!(
            "Fetching daily means for {} ({}) from {} to {}",
            location.name,
            location.format_coordinates(),
            start_date,
            end_date
        );
        let start_time = Instant::now();

        let query = Self::query(location, start_date, end_date);
        let payload = self
            .fetcher
            .get_json(ARCHIVE_ENDPOINT, &query, self.timeout)
            .await?;

        let series = parse_archive_response(payload, location, start_date, end_date)?;

        debug!(
            "Fetched {} temperature values for {} ({} missing) in {:.3}s",
            series.len(),
            location.name,
            series.missing_days,
            start_time.elapsed().as_secs_f64()
        );
        Ok(series)
    }
}
