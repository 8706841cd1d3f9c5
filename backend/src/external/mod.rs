//! Trained model artifacts consumed by the server

pub mod forest;

pub use forest::ForestClassifier;
