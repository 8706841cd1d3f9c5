//! Prediction request and result models

use serde::{Deserialize, Serialize};

use super::input::FormField;

/// Feature columns in the order the classifier expects them
pub const FEATURE_ORDER: [&str; 7] = ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

/// A fully validated record ready for the classifier
///
/// Only [`crate::validation::validate_record`] builds one, so every instance
/// carries all seven measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionRequest {
    #[serde(rename = "N")]
    nitrogen: i32,
    #[serde(rename = "P")]
    phosphorus: i32,
    #[serde(rename = "K")]
    potassium: i32,
    temperature: f64,
    humidity: f64,
    ph: f64,
    rainfall: f64,
}

impl PredictionRequest {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        nitrogen: i32,
        phosphorus: i32,
        potassium: i32,
        temperature: f64,
        humidity: f64,
        ph: f64,
        rainfall: f64,
    ) -> Self {
        Self {
            nitrogen,
            phosphorus,
            potassium,
            temperature,
            humidity,
            ph,
            rainfall,
        }
    }

    /// The seven values in [`FEATURE_ORDER`]
    pub fn features(&self) -> [f64; 7] {
        [
            f64::from(self.nitrogen),
            f64::from(self.phosphorus),
            f64::from(self.potassium),
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }

    pub fn get(&self, field: FormField) -> f64 {
        match field {
            FormField::Nitrogen => f64::from(self.nitrogen),
            FormField::Phosphorus => f64::from(self.phosphorus),
            FormField::Potassium => f64::from(self.potassium),
            FormField::Temperature => self.temperature,
            FormField::Humidity => self.humidity,
            FormField::Ph => self.ph,
            FormField::Rainfall => self.rainfall,
        }
    }
}

/// Decoded classifier output shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(rename = "crop")]
    pub crop_name: String,
}
