use async_trait::async_trait;
use chrono::NaiveDate;

use crate::Result;
use crate::models::{Location, TemperatureSeries};

pub mod open_meteo;

/// Source of daily mean outdoor temperatures.
///
/// One call issues one retrieval; implementations never retry or cache.
#[async_trait]
pub trait TemperatureSource: Send + Sync {
    /// Daily means for the inclusive range, chronological, gaps removed.
    ///
    /// Fails with `Network`, `DataFormat` or `NoData`.
    async fn fetch(
        &self,
        location: &Location,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<TemperatureSeries>;
}

#[async_trait]
impl<T: TemperatureSource + ?Sized> TemperatureSource for std::sync::Arc<T> {
    async fn fetch(
        &self,
        location: &Location,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<TemperatureSeries> {
        (**self).fetch(location, start_date, end_date).await
    }
}
