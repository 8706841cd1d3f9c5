//! Classifier boundary
//!
//! The trained model and its label decoder are opaque artifacts. The pipeline
//! only sees them through these two traits, so any implementation (a loaded
//! forest, a remote service, a test stub) can be plugged in.

use crate::models::{PredictionRequest, PredictionResult};

/// Errors raised while turning a validated request into a crop name
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("classifier rejected the record: {0}")]
    Classifier(String),

    #[error("class index {index} is outside the label vocabulary of {classes} entries")]
    UnknownClass { index: usize, classes: usize },
}

/// Maps an ordered measurement record to a class index
pub trait Classifier: Send + Sync {
    fn predict(&self, request: &PredictionRequest) -> Result<usize, PredictionError>;

    /// Number of classes the model can emit, when known
    fn n_classes(&self) -> Option<usize> {
        None
    }
}

/// Maps a class index back to a crop name
pub trait LabelDecoder: Send + Sync {
    fn decode(&self, index: usize) -> Result<String, PredictionError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run the classifier on a validated request and decode its answer
pub fn recommend<C, D>(
    classifier: &C,
    decoder: &D,
    request: &PredictionRequest,
) -> Result<PredictionResult, PredictionError>
where
    C: Classifier + ?Sized,
    D: LabelDecoder + ?Sized,
{
    let index = classifier.predict(request)?;
    let crop_name = decoder.decode(index)?;
    Ok(PredictionResult { crop_name })
}

/// Label decoder backed by the ordered class vocabulary of a label encoder
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClassLabels {
    classes: Vec<String>,
}

impl ClassLabels {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }
}

impl LabelDecoder for ClassLabels {
    fn decode(&self, index: usize) -> Result<String, PredictionError> {
        self.classes
            .get(index)
            .cloned()
            .ok_or(PredictionError::UnknownClass {
                index,
                classes: self.classes.len(),
            })
    }

    fn len(&self) -> usize {
        self.classes.len()
    }
}
