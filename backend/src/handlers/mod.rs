//! HTTP handlers for the Crop Recommender

mod health;
mod recommendation;
mod weather;

pub use health::*;
pub use recommendation::*;
pub use weather::*;
