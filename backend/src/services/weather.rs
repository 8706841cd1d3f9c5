//! Weather lookup service for pre-filling the form

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::{region_from_selection, Month, WeatherDefaults, WeatherReferenceRow, WeatherTable};

use crate::error::{AppError, AppResult};

/// Weather lookup service backed by the shared reference table
#[derive(Clone)]
pub struct WeatherService {
    table: Arc<WeatherTable>,
}

/// Raw selector values as sent by the form
#[derive(Debug, Default, Deserialize)]
pub struct SelectionInput {
    pub month: Option<String>,
    pub region: Option<String>,
}

/// Defaults for a selection
#[derive(Debug, Clone, Serialize)]
pub struct WeatherDefaultsResponse {
    pub month: Option<Month>,
    pub region: Option<String>,
    /// Whether a reference row matched; when false all three values are zero
    pub matched: bool,
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
}

impl WeatherService {
    pub fn new(table: Arc<WeatherTable>) -> Self {
        Self { table }
    }

    /// Resolve the selectors and look up the matching reference row
    ///
    /// A placeholder or empty selector counts as unset. A region that does not
    /// appear in the table is rejected.
    pub fn defaults(&self, input: &SelectionInput) -> AppResult<WeatherDefaultsResponse> {
        let month = match input.month.as_deref() {
            Some(value) => Month::from_selection(value)?,
            None => None,
        };
        let region = input.region.as_deref().and_then(region_from_selection);

        if let Some(region) = region {
            if !self.table.has_region(region) {
                return Err(AppError::UnknownRegion(region.to_string()));
            }
        }

        let lookup = self.table.lookup(month, region);
        let defaults = lookup.unwrap_or(WeatherDefaults::ZERO);

        tracing::debug!(?month, ?region, matched = lookup.is_some(), "Weather lookup");

        Ok(WeatherDefaultsResponse {
            month,
            region: region.map(str::to_string),
            matched: lookup.is_some(),
            temperature: defaults.temperature,
            humidity: defaults.humidity,
            rainfall: defaults.rainfall,
        })
    }

    pub fn rows(&self) -> &[WeatherReferenceRow] {
        self.table.rows()
    }
}
