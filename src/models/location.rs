//! Location model for geographic coordinates

use serde::{Deserialize, Serialize};

/// A named point for which degree days are calculated
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Location name (city, site, ...); used as the result key
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new<S: Into<String>>(name: S, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    #[must_use]
    pub fn has_valid_latitude(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude)
    }

    #[must_use]
    pub fn has_valid_longitude(&self) -> bool {
        (-180.0..=180.0).contains(&self.longitude)
    }

    /// Both coordinates inside their WGS84 ranges (NaN is never valid)
    #[must_use]
    pub fn has_valid_coordinates(&self) -> bool {
        self.has_valid_latitude() && self.has_valid_longitude()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_location_format_coordinates() {
        let location = Location::new("Berlin", 52.5244, 13.4105);
        assert_eq!(location.format_coordinates(), "52.5244, 13.4105");
    }

    #[rstest]
    #[case(90.0, 180.0, true)]
    #[case(-90.0, -180.0, true)]
    #[case(0.0, 0.0, true)]
    #[case(90.1, 0.0, false)]
    #[case(-90.1, 0.0, false)]
    #[case(0.0, 180.1, false)]
    #[case(0.0, -180.1, false)]
    #[case(f64::NAN, 0.0, false)]
    fn test_coordinate_ranges(#[case] lat: f64, #[case] lon: f64, #[case] valid: bool) {
        let location = Location::new("Test", lat, lon);
        assert_eq!(location.has_valid_coordinates(), valid);
    }

    #[test]
    fn test_location_deserializes_from_toml_like_json() {
        let location: Location = serde_json::from_str(
            r#"{"name": "München", "latitude": 48.1351, "longitude": 11.582}"#,
        )
        .unwrap();
        assert_eq!(location, Location::new("München", 48.1351, 11.582));
    }
}
