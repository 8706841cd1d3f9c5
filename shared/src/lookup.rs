//! Weather reference lookup
//!
//! Finds the reference row for a (month, region) selection and turns it into
//! the three pre-filled form defaults.

use crate::models::{WeatherDefaults, WeatherReferenceRow};
use crate::types::Month;

/// Read-only weather reference table, kept in its original row order
#[derive(Debug, Clone, Default)]
pub struct WeatherTable {
    rows: Vec<WeatherReferenceRow>,
}

impl WeatherTable {
    pub fn new(rows: Vec<WeatherReferenceRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[WeatherReferenceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct regions in order of first appearance
    pub fn regions(&self) -> Vec<&str> {
        let mut regions: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !regions.contains(&row.region.as_str()) {
                regions.push(&row.region);
            }
        }
        regions
    }

    pub fn has_region(&self, region: &str) -> bool {
        self.rows.iter().any(|row| row.region == region)
    }

    /// First row whose region equals `region` and whose month cell starts with
    /// the month's three-letter prefix
    ///
    /// Both comparisons are case-sensitive. When several rows match, the
    /// earliest one in table order wins.
    pub fn find(&self, month: Month, region: &str) -> Option<&WeatherReferenceRow> {
        let prefix = month.prefix();
        self.rows
            .iter()
            .find(|row| row.region == region && row.month.starts_with(prefix))
    }

    /// Defaults for a selection, or `None` when a selector is unset or nothing matches
    pub fn lookup(&self, month: Option<Month>, region: Option<&str>) -> Option<WeatherDefaults> {
        match (month, region) {
            (Some(month), Some(region)) => self.find(month, region).map(WeatherDefaults::from),
            _ => None,
        }
    }

    /// Defaults for a selection, falling back to all zeros
    pub fn defaults_for(&self, month: Option<Month>, region: Option<&str>) -> WeatherDefaults {
        self.lookup(month, region).unwrap_or(WeatherDefaults::ZERO)
    }
}

impl FromIterator<WeatherReferenceRow> for WeatherTable {
    fn from_iter<I: IntoIterator<Item = WeatherReferenceRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
