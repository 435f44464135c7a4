//! Human-readable summary of a result set

use crate::models::ResultSet;

pub const NO_RESULTS_MESSAGE: &str = "No calculation results available.";

/// Ranked summary, highest degree days first.
///
/// Period and thresholds in the header come from the first inserted result;
/// all results of one engine run share them.
#[must_use]
pub fn get_calculation_summary(results: &ResultSet) -> String {
    let Some(first) = results.first() else {
        return NO_RESULTS_MESSAGE.to_string();
    };

    let mut lines = vec![
        "=== GRADTAGSZAHLEN BERECHNUNG ===".to_string(),
        format!("Zeitraum: {} bis {}", first.period_start, first.period_end),
        // Debug output keeps `20.0` for whole values and `15.25` as given.
        format!("Raumtemperatur: {:?}°C", first.room_temperature),
        format!("Heizgrenze: {:?}°C", first.heating_limit),
        String::new(),
        "Ergebnisse:".to_string(),
    ];

    lines.extend(results.sorted_by_degree_days().into_iter().map(|result| {
        format!(
            "  {:20} {:8.1} Kd ({} Heiztage)",
            result.location_name, result.total_degree_days, result.heating_day_count
        )
    }));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::degree_days::HeatingDegreeDays;
    use crate::models::result::tests::result;
    use crate::models::{CalculationParameters, CalculationResult};

    #[test]
    fn test_empty_result_set() {
        assert_eq!(get_calculation_summary(&ResultSet::new()), NO_RESULTS_MESSAGE);
    }

    #[test]
    fn test_summary_orders_descending_with_stable_ties() {
        let mut set = ResultSet::new();
        set.insert(result("A", 5.0, 1));
        set.insert(result("B", 12.0, 2));
        set.insert(result("C", 12.0, 3));

        let summary = get_calculation_summary(&set);
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines[0], "=== GRADTAGSZAHLEN BERECHNUNG ===");
        assert_eq!(lines[1], "Zeitraum: 2022-10-01 bis 2023-04-30");
        assert_eq!(lines[2], "Raumtemperatur: 20.0°C");
        assert_eq!(lines[3], "Heizgrenze: 15.0°C");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Ergebnisse:");
        assert_eq!(&lines[6..], &[
            "  B                        12.0 Kd (2 Heiztage)",
            "  C                        12.0 Kd (3 Heiztage)",
            "  A                         5.0 Kd (1 Heiztage)",
        ]);
    }

    #[test]
    fn test_header_keeps_thresholds_as_given() {
        let params = CalculationParameters::parse("2023-01-01", "2023-01-31", 20.5, 15.25).unwrap();
        let mut set = ResultSet::new();
        set.insert(CalculationResult::new(
            "Dresden",
            HeatingDegreeDays {
                total: 190.0,
                heating_days: 31,
            },
            31,
            &params,
        ));

        let summary = get_calculation_summary(&set);
        assert!(summary.contains("Raumtemperatur: 20.5°C"));
        assert!(summary.contains("Heizgrenze: 15.25°C"));
        assert!(!summary.ends_with('\n'));
    }

    #[test]
    fn test_summary_is_deterministic() {
        let mut set = ResultSet::new();
        set.insert(result("Berlin", 3012.44, 201));
        set.insert(result("München", 3350.06, 214));

        assert_eq!(get_calculation_summary(&set), get_calculation_summary(&set));
        let summary = get_calculation_summary(&set);
        let berlin = summary.find("Berlin").unwrap();
        let munich = summary.find("München").unwrap();
        assert!(munich < berlin);
        assert!(summary.contains("3350.1 Kd"));
    }
}
