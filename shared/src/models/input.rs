//! Form input models

use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::fmt;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::types::Month;

/// The seven measurement fields of the form, in declared order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Nitrogen,
    Phosphorus,
    Potassium,
    Temperature,
    Humidity,
    Ph,
    Rainfall,
}

/// Declared bounds and input step of a form field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Whether the field only accepts whole numbers
    pub integer: bool,
}

impl FormField {
    /// All fields in declared order; validation reports follow this order
    pub const ALL: [FormField; 7] = [
        FormField::Nitrogen,
        FormField::Phosphorus,
        FormField::Potassium,
        FormField::Temperature,
        FormField::Humidity,
        FormField::Ph,
        FormField::Rainfall,
    ];

    /// Human-readable name shown next to the input and in validation messages
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Nitrogen => "Nitrogen (N)",
            FormField::Phosphorus => "Phosphorus (P)",
            FormField::Potassium => "Potassium (K)",
            FormField::Temperature => "Temperature (°C)",
            FormField::Humidity => "Humidity (%)",
            FormField::Ph => "pH level",
            FormField::Rainfall => "Rainfall (mm)",
        }
    }

    /// Key used in JSON payloads
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Nitrogen => "nitrogen",
            FormField::Phosphorus => "phosphorus",
            FormField::Potassium => "potassium",
            FormField::Temperature => "temperature",
            FormField::Humidity => "humidity",
            FormField::Ph => "ph",
            FormField::Rainfall => "rainfall",
        }
    }

    /// Column name the classifier was trained on
    pub fn feature_name(&self) -> &'static str {
        match self {
            FormField::Nitrogen => "N",
            FormField::Phosphorus => "P",
            FormField::Potassium => "K",
            FormField::Temperature => "temperature",
            FormField::Humidity => "humidity",
            FormField::Ph => "ph",
            FormField::Rainfall => "rainfall",
        }
    }

    pub fn bounds(&self) -> FieldBounds {
        match self {
            FormField::Nitrogen | FormField::Phosphorus | FormField::Potassium => FieldBounds {
                min: 0.0,
                max: 200.0,
                step: 1.0,
                integer: true,
            },
            FormField::Temperature => FieldBounds {
                min: -50.0,
                max: 50.0,
                step: 0.1,
                integer: false,
            },
            FormField::Humidity => FieldBounds {
                min: 0.0,
                max: 100.0,
                step: 0.1,
                integer: false,
            },
            FormField::Ph => FieldBounds {
                min: 0.0,
                max: 14.0,
                step: 0.1,
                integer: false,
            },
            FormField::Rainfall => FieldBounds {
                min: 0.0,
                max: 500.0,
                step: 1.0,
                integer: false,
            },
        }
    }

    pub fn from_key(key: &str) -> Option<FormField> {
        FormField::ALL.iter().copied().find(|f| f.key() == key)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Session-local state of the form
///
/// A `None` measurement has not been entered yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    #[serde(default, deserialize_with = "whole_number_opt")]
    pub nitrogen: Option<i32>,
    #[serde(default, deserialize_with = "whole_number_opt")]
    pub phosphorus: Option<i32>,
    #[serde(default, deserialize_with = "whole_number_opt")]
    pub potassium: Option<i32>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub ph: Option<f64>,
    #[serde(default)]
    pub rainfall: Option<f64>,
    #[serde(default)]
    pub selected_month: Option<Month>,
    #[serde(default)]
    pub selected_region: Option<String>,
}

/// Round to the nearest whole value, saturating at the `i32` range
fn whole_number(value: f64) -> Option<i32> {
    value
        .is_finite()
        .then(|| value.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32)
}

/// Nutrient fields accept any JSON number; clamping to the field bounds happens later
fn whole_number_opt<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.and_then(whole_number))
}

impl InputRecord {
    /// Current value of a field, widened to `f64`
    pub fn value(&self, field: FormField) -> Option<f64> {
        match field {
            FormField::Nitrogen => self.nitrogen.map(f64::from),
            FormField::Phosphorus => self.phosphorus.map(f64::from),
            FormField::Potassium => self.potassium.map(f64::from),
            FormField::Temperature => self.temperature,
            FormField::Humidity => self.humidity,
            FormField::Ph => self.ph,
            FormField::Rainfall => self.rainfall,
        }
    }

    /// Set a field from a raw number; integer fields are rounded to the nearest whole value
    pub fn set(&mut self, field: FormField, value: Option<f64>) {
        let as_int = |v: Option<f64>| v.and_then(whole_number);
        match field {
            FormField::Nitrogen => self.nitrogen = as_int(value),
            FormField::Phosphorus => self.phosphorus = as_int(value),
            FormField::Potassium => self.potassium = as_int(value),
            FormField::Temperature => self.temperature = value,
            FormField::Humidity => self.humidity = value,
            FormField::Ph => self.ph = value,
            FormField::Rainfall => self.rainfall = value,
        }
    }

    /// Return a copy with every entered value clamped into its declared bounds
    ///
    /// Non-finite values are left as they are; validation rejects them.
    pub fn clamped(&self) -> InputRecord {
        let clamp_int = |v: Option<i32>, field: FormField| {
            let b = field.bounds();
            v.map(|v| v.clamp(b.min as i32, b.max as i32))
        };
        let clamp_float = |v: Option<f64>, field: FormField| {
            let b = field.bounds();
            v.map(|v| if v.is_finite() { v.clamp(b.min, b.max) } else { v })
        };

        InputRecord {
            nitrogen: clamp_int(self.nitrogen, FormField::Nitrogen),
            phosphorus: clamp_int(self.phosphorus, FormField::Phosphorus),
            potassium: clamp_int(self.potassium, FormField::Potassium),
            temperature: clamp_float(self.temperature, FormField::Temperature),
            humidity: clamp_float(self.humidity, FormField::Humidity),
            ph: clamp_float(self.ph, FormField::Ph),
            rainfall: clamp_float(self.rainfall, FormField::Rainfall),
            selected_month: self.selected_month,
            selected_region: self.selected_region.clone(),
        }
    }
}

/// Checks every entered value against [`FormField::bounds`]
///
/// Holds for any record returned by [`InputRecord::clamped`] unless a value is not finite.
impl Validate for InputRecord {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for field in FormField::ALL {
            let Some(value) = self.value(field) else {
                continue;
            };
            let bounds = field.bounds();

            if !value.is_finite() {
                let mut error = ValidationError::new("finite");
                error.message = Some(Cow::from(format!("{} must be a number", field.label())));
                errors.add(field.key(), error);
            } else if !validator::validate_range(value, Some(bounds.min), Some(bounds.max)) {
                let mut error = ValidationError::new("range");
                error.message = Some(Cow::from(format!(
                    "{} must be between {} and {}",
                    field.label(),
                    bounds.min,
                    bounds.max
                )));
                error.add_param(Cow::from("value"), &value);
                errors.add(field.key(), error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
