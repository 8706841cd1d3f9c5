//! Crop recommendation service
//!
//! Validates a submitted form and asks the loaded classifier for a crop.

use std::sync::Arc;

use serde::Serialize;
use shared::{
    recommend, validate_record, FieldBounds, FormField, InputRecord, Month, PredictionResult,
    ZeroPolicy, UNSET_MONTH, UNSET_REGION,
};

use crate::error::AppResult;
use crate::services::reference::RecommenderContext;

/// Recommendation service over the startup context
#[derive(Clone)]
pub struct RecommendationService {
    context: Arc<RecommenderContext>,
    policy: ZeroPolicy,
}

/// Description of one input field for rendering the form
#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub bounds: FieldBounds,
}

impl From<FormField> for FieldDescriptor {
    fn from(field: FormField) -> Self {
        Self {
            key: field.key(),
            label: field.label(),
            bounds: field.bounds(),
        }
    }
}

/// Everything the form needs to render its selectors and inputs
#[derive(Debug, Clone, Serialize)]
pub struct FormOptions {
    /// Placeholder first, then the twelve months
    pub months: Vec<&'static str>,
    /// Placeholder first, then the table's regions
    pub regions: Vec<String>,
    pub fields: Vec<FieldDescriptor>,
    pub accept_zero_measurements: bool,
}

impl RecommendationService {
    pub fn new(context: Arc<RecommenderContext>, policy: ZeroPolicy) -> Self {
        Self { context, policy }
    }

    pub fn form_options(&self) -> FormOptions {
        let months = std::iter::once(UNSET_MONTH)
            .chain(Month::ALL.iter().map(|m| m.name()))
            .collect();
        let regions = std::iter::once(UNSET_REGION)
            .chain(self.context.table.regions())
            .map(str::to_string)
            .collect();

        FormOptions {
            months,
            regions,
            fields: FormField::ALL.into_iter().map(FieldDescriptor::from).collect(),
            accept_zero_measurements: self.policy == ZeroPolicy::Accept,
        }
    }

    /// Validate the record and decode the classifier's answer
    ///
    /// The record and result are not logged or kept.
    pub fn recommend(&self, record: &InputRecord) -> AppResult<PredictionResult> {
        let request = validate_record(record, self.policy).map_err(|err| {
            tracing::debug!(missing = err.missing_labels().len(), "Form rejected");
            err
        })?;

        let result = recommend(
            self.context.classifier.as_ref(),
            self.context.decoder.as_ref(),
            &request,
        )?;

        tracing::debug!("Recommendation produced");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use shared::{
        ClassLabels, Classifier, FormError, PredictionError, PredictionRequest, WeatherTable,
    };
    use std::sync::Mutex;

    /// Records every request it sees and answers with a fixed class
    struct RecordingClassifier {
        answer: usize,
        seen: Arc<Mutex<Vec<[f64; 7]>>>,
    }

    impl Classifier for RecordingClassifier {
        fn predict(&self, request: &PredictionRequest) -> Result<usize, PredictionError> {
            self.seen.lock().unwrap().push(request.features());
            Ok(self.answer)
        }
    }

    fn service(answer: usize, policy: ZeroPolicy) -> (RecommendationService, Arc<Mutex<Vec<[f64; 7]>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let labels = ClassLabels::new(
            ["apple", "banana", "chickpea", "coffee", "maize", "rice"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        let context = RecommenderContext::new(
            WeatherTable::default(),
            Box::new(RecordingClassifier {
                answer,
                seen: seen.clone(),
            }),
            Box::new(labels),
        )
        .unwrap();
        (RecommendationService::new(Arc::new(context), policy), seen)
    }

    fn rice_field() -> InputRecord {
        InputRecord {
            nitrogen: Some(90),
            phosphorus: Some(42),
            potassium: Some(43),
            temperature: Some(20.9),
            humidity: Some(82.0),
            ph: Some(6.5),
            rainfall: Some(202.9),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_form_recommends_rice() {
        let (service, seen) = service(5, ZeroPolicy::default());
        let result = service.recommend(&rice_field()).unwrap();
        assert_eq!(result.crop_name, "rice");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], [90.0, 42.0, 43.0, 20.9, 82.0, 6.5, 202.9]);
    }

    #[test]
    fn test_zero_nitrogen_never_calls_classifier() {
        let (service, seen) = service(5, ZeroPolicy::default());
        let record = InputRecord {
            nitrogen: Some(0),
            ..rice_field()
        };

        match service.recommend(&record) {
            Err(AppError::Form(err @ FormError::MissingFields(_))) => {
                assert_eq!(err.missing_labels(), vec!["Nitrogen (N)"]);
            }
            other => panic!("expected missing fields, got {other:?}"),
        }
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_accept_policy_predicts_with_zero_rainfall() {
        let (service, seen) = service(4, ZeroPolicy::Accept);
        let record = InputRecord {
            rainfall: Some(0.0),
            ..rice_field()
        };
        assert_eq!(service.recommend(&record).unwrap().crop_name, "maize");
        assert_eq!(seen.lock().unwrap()[0][6], 0.0);
    }

    #[test]
    fn test_out_of_vocabulary_class_is_prediction_error() {
        let (service, _) = service(42, ZeroPolicy::default());
        assert!(matches!(
            service.recommend(&rice_field()),
            Err(AppError::Prediction(PredictionError::UnknownClass { index: 42, .. }))
        ));
    }

    #[test]
    fn test_form_options_start_with_placeholders() {
        let (service, _) = service(0, ZeroPolicy::default());
        let options = service.form_options();
        assert_eq!(options.months.len(), 13);
        assert_eq!(options.months[0], UNSET_MONTH);
        assert_eq!(options.months[7], "July");
        assert_eq!(options.regions, vec![UNSET_REGION.to_string()]);
        assert_eq!(options.fields.len(), 7);
        assert_eq!(options.fields[5].label, "pH level");
        assert!(!options.accept_zero_measurements);
    }
}
