//! Interactive form session
//!
//! Holds one user's form state and re-runs the pipeline on every event:
//! selector changes refresh the weather defaults, field edits reset any shown
//! result, and submitting validates and asks the classifier.

use std::sync::Arc;

use crate::classifier::{recommend, Classifier, LabelDecoder, PredictionError};
use crate::lookup::WeatherTable;
use crate::models::{FormField, InputRecord, PredictionRequest, PredictionResult, WeatherDefaults};
use crate::types::Month;
use crate::validation::{validate_record, FormError, ZeroPolicy};

/// The two observable states of a session
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormState {
    /// Editing, or a submission was rejected
    #[default]
    Pending,
    /// A recommendation is on screen
    ResultDisplayed(PredictionResult),
}

/// Failure of a submit action
#[derive(Debug, Clone, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

/// One user's form, backed by the shared reference table
#[derive(Debug, Clone)]
pub struct FormSession {
    table: Arc<WeatherTable>,
    policy: ZeroPolicy,
    record: InputRecord,
    defaults: WeatherDefaults,
    state: FormState,
}

impl FormSession {
    pub fn new(table: Arc<WeatherTable>, policy: ZeroPolicy) -> Self {
        Self {
            table,
            policy,
            record: InputRecord::default(),
            defaults: WeatherDefaults::ZERO,
            state: FormState::Pending,
        }
    }

    pub fn record(&self) -> &InputRecord {
        &self.record
    }

    /// Defaults computed from the current month and region selection
    pub fn defaults(&self) -> WeatherDefaults {
        self.defaults
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn select_month(&mut self, month: Option<Month>) {
        self.record.selected_month = month;
        self.refresh_defaults();
    }

    pub fn select_region(&mut self, region: Option<String>) {
        self.record.selected_region = region;
        self.refresh_defaults();
    }

    /// Edit one measurement; the value is clamped into the field's bounds
    pub fn set_field(&mut self, field: FormField, value: Option<f64>) {
        self.record.set(field, value);
        self.record = self.record.clamped();
        self.state = FormState::Pending;
    }

    /// Validate the current record without touching the session
    pub fn prepare(&self) -> Result<PredictionRequest, FormError> {
        validate_record(&self.record, self.policy)
    }

    /// Validate, predict and display the recommendation
    ///
    /// On failure the form keeps its values so the user can correct them.
    pub fn submit<C, D>(&mut self, classifier: &C, decoder: &D) -> Result<PredictionResult, SubmitError>
    where
        C: Classifier + ?Sized,
        D: LabelDecoder + ?Sized,
    {
        self.state = FormState::Pending;
        let request = self.prepare()?;
        let result = recommend(classifier, decoder, &request)?;
        self.display(result.clone());
        Ok(result)
    }

    /// Show a result obtained elsewhere, e.g. from a server round trip
    pub fn display(&mut self, result: PredictionResult) {
        self.state = FormState::ResultDisplayed(result);
    }

    /// The recommendation on screen, if any
    pub fn result(&self) -> Option<&PredictionResult> {
        match &self.state {
            FormState::ResultDisplayed(result) => Some(result),
            FormState::Pending => None,
        }
    }

    fn refresh_defaults(&mut self) {
        self.state = FormState::Pending;
        let lookup = self.table.lookup(
            self.record.selected_month,
            self.record.selected_region.as_deref(),
        );
        self.defaults = lookup.unwrap_or(WeatherDefaults::ZERO);

        if let Some(defaults) = lookup {
            self.record.temperature = Some(defaults.temperature);
            self.record.humidity = Some(defaults.humidity);
            self.record.rainfall = Some(defaults.rainfall);
            self.record = self.record.clamped();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassLabels;
    use crate::models::WeatherReferenceRow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingClassifier {
        calls: AtomicUsize,
    }

    impl Classifier for CountingClassifier {
        fn predict(&self, _request: &PredictionRequest) -> Result<usize, PredictionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(1)
        }
    }

    fn session() -> FormSession {
        let table = WeatherTable::new(vec![WeatherReferenceRow {
            region: "Texas".to_string(),
            month: "July".to_string(),
            mean_temperature: 31.2,
            average_humidity: 55.0,
            average_precipitation: 12.4,
        }]);
        FormSession::new(Arc::new(table), ZeroPolicy::default())
    }

    fn labels() -> ClassLabels {
        ClassLabels::new(vec!["maize".to_string(), "cotton".to_string()])
    }

    #[test]
    fn test_selection_fills_weather_fields() {
        let mut session = session();
        session.select_region(Some("Texas".to_string()));
        assert_eq!(session.defaults(), WeatherDefaults::ZERO);
        assert_eq!(session.record().temperature, None);

        session.select_month(Some(Month::July));
        assert_eq!(session.record().temperature, Some(31.2));
        assert_eq!(session.record().humidity, Some(55.0));
        assert_eq!(session.record().rainfall, Some(12.4));
    }

    #[test]
    fn test_unmatched_selection_keeps_user_values() {
        let mut session = session();
        session.set_field(FormField::Temperature, Some(18.0));
        session.select_month(Some(Month::March));
        session.select_region(Some("Texas".to_string()));
        assert_eq!(session.defaults(), WeatherDefaults::ZERO);
        assert_eq!(session.record().temperature, Some(18.0));
    }

    #[test]
    fn test_submit_with_missing_fields_never_predicts() {
        let classifier = CountingClassifier {
            calls: AtomicUsize::new(0),
        };
        let mut session = session();
        session.select_month(Some(Month::July));
        session.select_region(Some("Texas".to_string()));

        let err = session.submit(&classifier, &labels()).unwrap_err();
        match err {
            SubmitError::Form(form) => assert_eq!(
                form.missing_labels(),
                vec!["Nitrogen (N)", "Phosphorus (P)", "Potassium (K)", "pH level"]
            ),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.state(), &FormState::Pending);
        assert_eq!(session.record().temperature, Some(31.2));
    }

    #[test]
    fn test_submit_displays_result_and_edit_resets() {
        let classifier = CountingClassifier {
            calls: AtomicUsize::new(0),
        };
        let mut session = session();
        session.select_month(Some(Month::July));
        session.select_region(Some("Texas".to_string()));
        session.set_field(FormField::Nitrogen, Some(90.0));
        session.set_field(FormField::Phosphorus, Some(42.0));
        session.set_field(FormField::Potassium, Some(43.0));
        session.set_field(FormField::Ph, Some(6.5));

        let result = session.submit(&classifier, &labels()).unwrap();
        assert_eq!(result.crop_name, "cotton");
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.result().map(|r| r.crop_name.as_str()), Some("cotton"));

        session.set_field(FormField::Ph, Some(7.0));
        assert_eq!(session.state(), &FormState::Pending);
    }

    #[test]
    fn test_set_field_clamps() {
        let mut session = session();
        session.set_field(FormField::Rainfall, Some(9000.0));
        assert_eq!(session.record().rainfall, Some(500.0));
    }
}
