//! WebAssembly module for the Crop Recommender
//!
//! Provides client-side form handling for:
//! - Field descriptors and bounds
//! - Weather defaults from a downloaded reference table
//! - Clamping and missing-field checks before a submit

use std::sync::Arc;

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{FormSession, WeatherTable};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("crop recommender form helper loaded"));
}

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, err))
}

fn field_by_key(key: &str) -> Result<FormField, JsValue> {
    FormField::from_key(key).ok_or_else(|| js_error("Unknown field", key))
}

/// Field keys in submit order
#[wasm_bindgen]
pub fn field_keys() -> js_sys::Array {
    FormField::ALL
        .iter()
        .map(|field| JsValue::from_str(field.key()))
        .collect()
}

/// Display label for a field key
#[wasm_bindgen]
pub fn field_label(key: &str) -> Result<String, JsValue> {
    Ok(field_by_key(key)?.label().to_string())
}

/// Clamp a raw value into a field's bounds; integer fields are rounded
#[wasm_bindgen]
pub fn clamp_field(key: &str, value: f64) -> Result<f64, JsValue> {
    let field = field_by_key(key)?;
    let mut record = InputRecord::default();
    record.set(field, Some(value));
    Ok(record.clamped().value(field).unwrap_or(0.0))
}

/// Labels of the fields still missing from a JSON-encoded record
#[wasm_bindgen]
pub fn missing_field_labels(record_json: &str, accept_zero: bool) -> Result<js_sys::Array, JsValue> {
    let record: InputRecord =
        serde_json::from_str(record_json).map_err(|e| js_error("Invalid record JSON", e))?;

    Ok(missing_fields(&record.clamped(), ZeroPolicy::from_accept_zero(accept_zero))
        .into_iter()
        .map(|field| JsValue::from_str(field.label()))
        .collect())
}

/// Browser-side form state
///
/// Mirrors what the server does on submit so the page can show missing
/// fields and pre-filled weather values without a round trip.
#[wasm_bindgen]
pub struct CropForm {
    session: FormSession,
}

#[wasm_bindgen]
impl CropForm {
    /// Build from the rows served by `/api/v1/weather/table`
    #[wasm_bindgen(constructor)]
    pub fn new(table_json: &str, accept_zero: bool) -> Result<CropForm, JsValue> {
        let rows: Vec<WeatherReferenceRow> =
            serde_json::from_str(table_json).map_err(|e| js_error("Invalid table JSON", e))?;

        Ok(CropForm {
            session: FormSession::new(
                Arc::new(WeatherTable::new(rows)),
                ZeroPolicy::from_accept_zero(accept_zero),
            ),
        })
    }

    /// Select a month by its selector value; the placeholder clears the selection
    pub fn select_month(&mut self, value: &str) -> Result<(), JsValue> {
        let month = Month::from_selection(value).map_err(|e| js_error("Invalid month", e))?;
        self.session.select_month(month);
        Ok(())
    }

    /// Select a region by its selector value; the placeholder clears the selection
    pub fn select_region(&mut self, value: &str) {
        self.session
            .select_region(region_from_selection(value).map(str::to_string));
    }

    pub fn set_field(&mut self, key: &str, value: Option<f64>) -> Result<(), JsValue> {
        let field = field_by_key(key)?;
        self.session.set_field(field, value);
        Ok(())
    }

    /// Current value of a field, after clamping and any weather pre-fill
    pub fn value(&self, key: &str) -> Result<Option<f64>, JsValue> {
        Ok(self.session.record().value(field_by_key(key)?))
    }

    /// The current record as JSON, ready to POST to `/api/v1/recommendations`
    pub fn record_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.record()).map_err(|e| js_error("Serialization failed", e))
    }

    /// The message to show when the form cannot be submitted yet
    pub fn validation_message(&self) -> Option<String> {
        self.session.prepare().err().map(|err| err.to_string())
    }

    /// Show a crop returned by the server
    pub fn display_result(&mut self, crop: &str) {
        self.session.display(PredictionResult {
            crop_name: crop.to_string(),
        });
    }

    /// The crop on screen, if any; cleared by every edit
    pub fn result(&self) -> Option<String> {
        self.session.result().map(|result| result.crop_name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"[
        {"region": "Texas", "month": "July", "meanTemperature": 31.2,
         "averageHumidity": 55.0, "averagePrecipitation": 12.4}
    ]"#;

    fn filled_form() -> CropForm {
        let mut form = CropForm::new(TABLE, false).unwrap();
        for (key, value) in [
            ("nitrogen", 90.0),
            ("phosphorus", 42.0),
            ("potassium", 43.0),
            ("temperature", 20.9),
            ("humidity", 82.0),
            ("ph", 6.5),
            ("rainfall", 202.9),
        ] {
            form.set_field(key, Some(value)).unwrap();
        }
        form
    }

    #[test]
    fn test_selection_prefills_weather() {
        let mut form = CropForm::new(TABLE, false).unwrap();
        form.select_month("July").unwrap();
        form.select_region("Texas");
        assert_eq!(form.value("temperature").unwrap(), Some(31.2));
        assert_eq!(form.value("rainfall").unwrap(), Some(12.4));
    }

    #[test]
    fn test_placeholder_selection_keeps_values() {
        let mut form = filled_form();
        form.select_month(UNSET_MONTH).unwrap();
        form.select_region(UNSET_REGION);
        assert_eq!(form.value("humidity").unwrap(), Some(82.0));
    }

    #[test]
    fn test_validation_message_for_zero_nitrogen() {
        let mut form = filled_form();
        assert_eq!(form.validation_message(), None);

        form.set_field("nitrogen", Some(0.0)).unwrap();
        assert_eq!(
            form.validation_message().as_deref(),
            Some("Please fill in the following fields: Nitrogen (N)")
        );
    }

    #[test]
    fn test_result_cleared_by_edit() {
        let mut form = filled_form();
        form.display_result("rice");
        assert_eq!(form.result().as_deref(), Some("rice"));

        form.set_field("ph", Some(7.0)).unwrap();
        assert_eq!(form.result(), None);
    }

    #[test]
    fn test_record_json_round_trips_through_backend_shape() {
        let json = filled_form().record_json().unwrap();
        let record: InputRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.nitrogen, Some(90));
    }
}
