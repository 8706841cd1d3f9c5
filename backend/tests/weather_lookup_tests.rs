//! Weather lookup tests
//!
//! Covers the month/region lookup that pre-fills temperature, humidity and
//! rainfall on the form.

use proptest::prelude::*;
use shared::{Month, WeatherDefaults, WeatherReferenceRow, WeatherTable};

fn row(region: &str, month: &str, temperature: f64, humidity: f64, rainfall: f64) -> WeatherReferenceRow {
    WeatherReferenceRow {
        region: region.to_string(),
        month: month.to_string(),
        mean_temperature: temperature,
        average_humidity: humidity,
        average_precipitation: rainfall,
    }
}

fn sample_table() -> WeatherTable {
    vec![
        row("Texas", "January", 10.5, 64.0, 48.3),
        row("Texas", "July", 31.2, 55.0, 12.4),
        row("Iowa", "Jul", 24.1, 70.0, 114.8),
        row("Iowa", "Oct", 11.9, 66.0, 68.6),
        row("Florida", "July", 28.3, 76.0, 181.1),
    ]
    .into_iter()
    .collect()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_texas_july() {
        let defaults = sample_table().defaults_for(Some(Month::July), Some("Texas"));
        assert_eq!(
            defaults,
            WeatherDefaults {
                temperature: 31.2,
                humidity: 55.0,
                rainfall: 12.4,
            }
        );
    }

    #[test]
    fn test_abbreviated_month_cells_match() {
        let defaults = sample_table().defaults_for(Some(Month::October), Some("Iowa"));
        assert_eq!(defaults.temperature, 11.9);
        assert_eq!(defaults.rainfall, 68.6);
    }

    #[test]
    fn test_unset_selectors_give_zeros() {
        let table = sample_table();
        assert_eq!(table.defaults_for(None, Some("Texas")), WeatherDefaults::ZERO);
        assert_eq!(table.defaults_for(Some(Month::July), None), WeatherDefaults::ZERO);
        assert_eq!(table.defaults_for(None, None), WeatherDefaults::ZERO);
    }

    #[test]
    fn test_absent_pair_gives_zeros() {
        let table = sample_table();
        assert_eq!(table.lookup(Some(Month::March), Some("Texas")), None);
        assert_eq!(table.defaults_for(Some(Month::March), Some("Texas")), WeatherDefaults::ZERO);
    }

    #[test]
    fn test_region_match_is_case_sensitive() {
        assert_eq!(sample_table().lookup(Some(Month::July), Some("texas")), None);
    }

    #[test]
    fn test_first_matching_row_wins() {
        let table: WeatherTable = vec![
            row("Texas", "Jul", 30.0, 50.0, 10.0),
            row("Texas", "July", 99.0, 99.0, 99.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.defaults_for(Some(Month::July), Some("Texas")).temperature, 30.0);
    }

    #[test]
    fn test_june_does_not_match_july() {
        let table: WeatherTable = vec![row("Texas", "July", 31.2, 55.0, 12.4)].into_iter().collect();
        assert_eq!(table.lookup(Some(Month::June), Some("Texas")), None);
    }

    #[test]
    fn test_regions_first_appearance_order() {
        assert_eq!(sample_table().regions(), vec!["Texas", "Iowa", "Florida"]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

fn month_strategy() -> impl Strategy<Value = Month> {
    prop::sample::select(Month::ALL.to_vec())
}

fn region_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,10}"
}

fn measurement_strategy() -> impl Strategy<Value = (f64, f64, f64)> {
    (-30.0f64..45.0, 0.0f64..100.0, 0.0f64..500.0)
}

proptest! {
    /// A table holding exactly one row for the pair returns that row's values
    #[test]
    fn test_single_match_returns_row_values(
        month in month_strategy(),
        region in region_strategy(),
        (temperature, humidity, rainfall) in measurement_strategy(),
    ) {
        let table: WeatherTable = vec![row(&region, month.name(), temperature, humidity, rainfall)]
            .into_iter()
            .collect();

        let defaults = table.defaults_for(Some(month), Some(&region));
        prop_assert_eq!(defaults.temperature, temperature);
        prop_assert_eq!(defaults.humidity, humidity);
        prop_assert_eq!(defaults.rainfall, rainfall);
    }

    /// A pair that is not in the table always gives zeros
    #[test]
    fn test_missing_pair_gives_zeros(
        month in month_strategy(),
        region in region_strategy(),
    ) {
        let table = sample_table();
        prop_assume!(table.find(month, &region).is_none());
        prop_assert_eq!(table.defaults_for(Some(month), Some(&region)), WeatherDefaults::ZERO);
    }

    /// Leaving either selector unset gives zeros whatever the table holds
    #[test]
    fn test_unset_selector_gives_zeros(
        month in month_strategy(),
        region in region_strategy(),
        (temperature, humidity, rainfall) in measurement_strategy(),
    ) {
        let table: WeatherTable = vec![row(&region, month.name(), temperature, humidity, rainfall)]
            .into_iter()
            .collect();

        prop_assert_eq!(table.defaults_for(None, Some(&region)), WeatherDefaults::ZERO);
        prop_assert_eq!(table.defaults_for(Some(month), None), WeatherDefaults::ZERO);
    }
}
