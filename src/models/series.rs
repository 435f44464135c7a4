//! Daily mean temperature series for one location

use chrono::NaiveDate;

use crate::{GradtageError, Result};

/// Chronological daily mean temperatures (°C) with gaps already removed
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureSeries {
    pub location_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Valid readings in source order
    pub readings: Vec<f64>,
    /// Entries the source reported as missing
    pub missing_days: usize,
}

impl TemperatureSeries {
    /// Build a series from raw source values, dropping missing entries.
    ///
    /// Fails with `NoData` when nothing is left.
    pub fn from_raw(
        location_name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        raw: Vec<Option<f64>>,
    ) -> Result<Self> {
        let total = raw.len();
        let readings: Vec<f64> = raw.into_iter().flatten().collect();

        if readings.is_empty() {
            return Err(GradtageError::no_data(location_name));
        }

        Ok(Self {
            location_name: location_name.to_string(),
            start_date,
            end_date,
            missing_days: total - readings.len(),
            readings,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}
