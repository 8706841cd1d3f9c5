//! Reference loader
//!
//! Reads the weather table and both model artifacts once at startup and
//! bundles them into the immutable context every request shares.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use shared::{ClassLabels, Classifier, LabelDecoder, WeatherReferenceRow, WeatherTable};

use crate::config::DataConfig;
use crate::external::{forest::ForestError, ForestClassifier};

/// Fatal problems with the startup artifacts
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("weather table {path} is missing required columns: {missing:?}")]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    #[error("weather table {path} is malformed: {source}")]
    Table { path: PathBuf, source: csv::Error },

    #[error("model {path} is malformed: {source}")]
    Model { path: PathBuf, source: ForestError },

    #[error("label encoder {path} is malformed: {source}")]
    LabelEncoder {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("model emits {model} classes but the label encoder knows {encoder}")]
    ClassCountMismatch { model: usize, encoder: usize },
}

/// Accepted header spellings for each required column
const REQUIRED_COLUMNS: [(&str, &str); 5] = [
    ("region", "State"),
    ("month", "Month"),
    ("meanTemperature", "Daily Mean (°C)"),
    ("averageHumidity", "Avg Relative Humidity (%)"),
    ("averagePrecipitation", "Avg Precipitation (mm)"),
];

/// Everything loaded at startup; shared read-only by all requests
pub struct RecommenderContext {
    pub table: Arc<WeatherTable>,
    pub classifier: Box<dyn Classifier>,
    pub decoder: Box<dyn LabelDecoder>,
}

impl RecommenderContext {
    pub fn new(
        table: WeatherTable,
        classifier: Box<dyn Classifier>,
        decoder: Box<dyn LabelDecoder>,
    ) -> Result<Self, LoadError> {
        if let Some(model) = classifier.n_classes() {
            if model != decoder.len() {
                return Err(LoadError::ClassCountMismatch {
                    model,
                    encoder: decoder.len(),
                });
            }
        }

        Ok(Self {
            table: Arc::new(table),
            classifier,
            decoder,
        })
    }

    /// Load all three artifacts from the configured paths
    pub fn load(data: &DataConfig) -> Result<Self, LoadError> {
        let table = load_weather_table(Path::new(&data.weather_table))?;
        let classifier = load_classifier(Path::new(&data.model))?;
        let decoder = load_label_encoder(Path::new(&data.label_encoder))?;

        tracing::info!(
            rows = table.len(),
            regions = table.regions().len(),
            trees = classifier.n_trees(),
            classes = decoder.len(),
            "Reference data loaded"
        );

        Self::new(table, Box::new(classifier), Box::new(decoder))
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_weather_table(path: &Path) -> Result<WeatherTable, LoadError> {
    read_weather_table(open(path)?, path)
}

/// Parse a CSV weather table; `path` is only used in error messages
pub fn read_weather_table<R: Read>(reader: R, path: &Path) -> Result<WeatherTable, LoadError> {
    let table_error = |source| LoadError::Table {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = reader.headers().map_err(table_error)?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|(canonical, source)| {
            !headers.iter().any(|h| h == *canonical || h == *source)
        })
        .map(|(canonical, _)| canonical.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns {
            path: path.to_path_buf(),
            missing,
        });
    }

    reader
        .deserialize::<WeatherReferenceRow>()
        .collect::<Result<WeatherTable, _>>()
        .map_err(table_error)
}

pub fn load_classifier(path: &Path) -> Result<ForestClassifier, LoadError> {
    ForestClassifier::from_reader(open(path)?).map_err(|source| LoadError::Model {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_label_encoder(path: &Path) -> Result<ClassLabels, LoadError> {
    serde_json::from_reader(open(path)?).map_err(|source| LoadError::LabelEncoder {
        path: path.to_path_buf(),
        source,
    })
}
