//! Heating degree day aggregation (VDI 2067)
//!
//! `Gt = Σ (room_temperature - t)` over all heating days, where a heating day
//! is a day whose mean outdoor temperature `t` is strictly below the heating
//! limit. A day exactly at the limit is not a heating day.

use serde::{Deserialize, Serialize};

/// Aggregated deficit and the number of days that contributed to it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatingDegreeDays {
    /// Kelvin-days (Kd)
    pub total: f64,
    pub heating_days: u32,
}

/// Single linear pass over chronological daily means.
#[must_use]
pub fn heating_degree_days(
    temperatures: &[f64],
    room_temperature: f64,
    heating_limit: f64,
) -> HeatingDegreeDays {
    temperatures
        .iter()
        .filter(|&&t| t < heating_limit)
        .fold(HeatingDegreeDays::default(), |acc, &t| HeatingDegreeDays {
            total: acc.total + (room_temperature - t),
            heating_days: acc.heating_days + 1,
        })
}
