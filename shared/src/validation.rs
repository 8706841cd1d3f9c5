//! Form validation
//!
//! Turns the current form state into a [`PredictionRequest`] or reports which
//! fields still need a value.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::{FormField, InputRecord, PredictionRequest};

/// How a measurement equal to its zero-equivalent (`0` / `0.0`) is treated
///
/// `TreatAsMissing` reports a zero as "not filled in", so a genuinely zero
/// reading (no rainfall, pH 0) can never be submitted. `Accept` only reports
/// fields that were never entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroPolicy {
    #[default]
    TreatAsMissing,
    Accept,
}

impl ZeroPolicy {
    pub fn from_accept_zero(accept_zero: bool) -> Self {
        if accept_zero {
            ZeroPolicy::Accept
        } else {
            ZeroPolicy::TreatAsMissing
        }
    }
}

/// Why a form could not be turned into a prediction request
#[derive(Debug, Clone, thiserror::Error)]
pub enum FormError {
    #[error("Please fill in the following fields: {}", join_labels(.0))]
    MissingFields(Vec<FormField>),

    #[error("Invalid field values: {0}")]
    InvalidValues(ValidationErrors),
}

fn join_labels(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FormError {
    /// Display names of the missing fields, in declared order
    pub fn missing_labels(&self) -> Vec<&'static str> {
        match self {
            FormError::MissingFields(fields) => fields.iter().map(|f| f.label()).collect(),
            FormError::InvalidValues(_) => Vec::new(),
        }
    }
}

// ============================================================================
// Field Checks
// ============================================================================

fn is_missing(value: Option<f64>, policy: ZeroPolicy) -> bool {
    match (value, policy) {
        (None, _) => true,
        (Some(v), ZeroPolicy::TreatAsMissing) => v == 0.0,
        (Some(_), ZeroPolicy::Accept) => false,
    }
}

/// Fields that still need a value, in declared order
pub fn missing_fields(record: &InputRecord, policy: ZeroPolicy) -> Vec<FormField> {
    FormField::ALL
        .iter()
        .copied()
        .filter(|field| is_missing(record.value(*field), policy))
        .collect()
}

/// Clamp, check and assemble the record handed to the classifier
///
/// Missing fields are reported before out-of-range or non-numeric values.
pub fn validate_record(
    record: &InputRecord,
    policy: ZeroPolicy,
) -> Result<PredictionRequest, FormError> {
    let record = record.clamped();

    let missing = missing_fields(&record, policy);
    if !missing.is_empty() {
        return Err(FormError::MissingFields(missing));
    }

    record.validate().map_err(FormError::InvalidValues)?;

    match (
        record.nitrogen,
        record.phosphorus,
        record.potassium,
        record.temperature,
        record.humidity,
        record.ph,
        record.rainfall,
    ) {
        (Some(n), Some(p), Some(k), Some(temperature), Some(humidity), Some(ph), Some(rainfall)) => {
            Ok(PredictionRequest::new(n, p, k, temperature, humidity, ph, rainfall))
        }
        _ => Err(FormError::MissingFields(missing_fields(
            &record,
            ZeroPolicy::Accept,
        ))),
    }
}
