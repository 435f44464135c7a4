//! Calculation parameters shared by every location of a batch

use chrono::NaiveDate;
use serde::Serialize;

use crate::{GradtageError, Result};

/// Calendar format accepted for period boundaries
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Period and temperature thresholds of one calculation run.
///
/// Only constructible through [`CalculationParameters::new`] or
/// [`CalculationParameters::parse`], so `start_date < end_date` and
/// `room_temperature > heating_limit` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationParameters {
    start_date: NaiveDate,
    end_date: NaiveDate,
    room_temperature: f64,
    heating_limit: f64,
}

impl CalculationParameters {
    /// Build parameters from typed dates
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        room_temperature: f64,
        heating_limit: f64,
    ) -> Result<Self> {
        if start_date >= end_date {
            return Err(GradtageError::validation(
                "start date must precede end date",
            ));
        }

        // Written as a negated `>` so NaN on either side is rejected too.
        if !(room_temperature > heating_limit) {
            return Err(GradtageError::validation(
                "room temperature must exceed heating limit",
            ));
        }

        Ok(Self {
            start_date,
            end_date,
            room_temperature,
            heating_limit,
        })
    }

    /// Build parameters from `YYYY-MM-DD` date strings
    pub fn parse(
        start_date: &str,
        end_date: &str,
        room_temperature: f64,
        heating_limit: f64,
    ) -> Result<Self> {
        let start = parse_date(start_date)?;
        let end = parse_date(end_date)?;
        Self::new(start, end, room_temperature, heating_limit)
    }

    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    #[must_use]
    pub fn room_temperature(&self) -> f64 {
        self.room_temperature
    }

    #[must_use]
    pub fn heating_limit(&self) -> f64 {
        self.heating_limit
    }

    /// Number of calendar days in the inclusive period
    #[must_use]
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        GradtageError::validation(format!(
            "invalid date format '{value}', expected YYYY-MM-DD"
        ))
    })
}
