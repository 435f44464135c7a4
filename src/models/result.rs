//! Per-location calculation results and the keyed result collection

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CalculationParameters, Location};
use crate::degree_days::HeatingDegreeDays;

/// Heating degree days of one location for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub location_name: String,
    /// Accumulated deficit in Kelvin-days (Kd)
    pub total_degree_days: f64,
    pub heating_day_count: u32,
    /// Readings that entered the aggregation
    pub valid_days: usize,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub room_temperature: f64,
    pub heating_limit: f64,
}

impl CalculationResult {
    #[must_use]
    pub fn new(
        location_name: &str,
        degree_days: HeatingDegreeDays,
        valid_days: usize,
        params: &CalculationParameters,
    ) -> Self {
        Self {
            location_name: location_name.to_string(),
            total_degree_days: degree_days.total,
            heating_day_count: degree_days.heating_days,
            valid_days,
            period_start: params.start_date(),
            period_end: params.end_date(),
            room_temperature: params.room_temperature(),
            heating_limit: params.heating_limit(),
        }
    }
}

/// Results keyed by location name.
///
/// Names are unique; inserting under an existing name replaces the entry in
/// place. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    entries: Vec<CalculationResult>,
}

impl ResultSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a result, returning the one it replaced
    pub fn insert(&mut self, result: CalculationResult) -> Option<CalculationResult> {
        match self
            .entries
            .iter_mut()
            .find(|existing| existing.location_name == result.location_name)
        {
            Some(existing) => Some(std::mem::replace(existing, result)),
            None => {
                self.entries.push(result);
                None
            }
        }
    }

    #[must_use]
    pub fn get(&self, location_name: &str) -> Option<&CalculationResult> {
        self.entries
            .iter()
            .find(|result| result.location_name == location_name)
    }

    #[must_use]
    pub fn contains(&self, location_name: &str) -> bool {
        self.get(location_name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Results in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &CalculationResult> {
        self.entries.iter()
    }

    #[must_use]
    pub fn first(&self) -> Option<&CalculationResult> {
        self.entries.first()
    }

    /// Results ordered by total degree days, highest first.
    /// Equal totals keep their insertion order.
    #[must_use]
    pub fn sorted_by_degree_days(&self) -> Vec<&CalculationResult> {
        let mut sorted: Vec<&CalculationResult> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.total_degree_days.total_cmp(&a.total_degree_days));
        sorted
    }

    /// Requested locations that have no entry in this set
    #[must_use]
    pub fn missing_locations<'a>(&self, requested: &'a [Location]) -> Vec<&'a Location> {
        requested
            .iter()
            .filter(|location| !self.contains(&location.name))
            .collect()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a CalculationResult;
    type IntoIter = std::slice::Iter<'a, CalculationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
