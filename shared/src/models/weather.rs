//! Weather reference models

use serde::{Deserialize, Serialize};

/// One row of the weather reference table
///
/// Column names are accepted in their canonical form or as the headers of the
/// source workbook export ("State", "Daily Mean (°C)", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReferenceRow {
    #[serde(rename = "region", alias = "State")]
    pub region: String,
    /// Full month name or an abbreviation such as "Jul"
    #[serde(rename = "month", alias = "Month")]
    pub month: String,
    /// Daily mean temperature in °C
    #[serde(rename = "meanTemperature", alias = "Daily Mean (°C)")]
    pub mean_temperature: f64,
    /// Average relative humidity in %
    #[serde(rename = "averageHumidity", alias = "Avg Relative Humidity (%)")]
    pub average_humidity: f64,
    /// Average precipitation in mm
    #[serde(rename = "averagePrecipitation", alias = "Avg Precipitation (mm)")]
    pub average_precipitation: f64,
}

/// The three measurements pre-filled from a matching reference row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherDefaults {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
}

impl WeatherDefaults {
    /// Defaults used when no reference row matches
    pub const ZERO: WeatherDefaults = WeatherDefaults {
        temperature: 0.0,
        humidity: 0.0,
        rainfall: 0.0,
    };
}

impl Default for WeatherDefaults {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<&WeatherReferenceRow> for WeatherDefaults {
    fn from(row: &WeatherReferenceRow) -> Self {
        Self {
            temperature: row.mean_temperature,
            humidity: row.average_humidity,
            rainfall: row.average_precipitation,
        }
    }
}
