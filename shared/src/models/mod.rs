//! Domain models for the crop recommender

mod input;
mod prediction;
mod weather;

pub use input::*;
pub use prediction::*;
pub use weather::*;
