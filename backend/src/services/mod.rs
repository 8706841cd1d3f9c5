//! Business logic services for the Crop Recommender

pub mod recommendation;
pub mod reference;
pub mod weather;

pub use recommendation::RecommendationService;
pub use reference::RecommenderContext;
pub use weather::WeatherService;
