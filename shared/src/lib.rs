//! Shared types and pipeline for the Crop Recommender
//!
//! This crate holds everything that does not depend on a UI or transport:
//! the weather lookup, form validation, and the classifier boundary. The
//! backend server and the WASM form helper are thin layers over it.

pub mod classifier;
pub mod lookup;
pub mod models;
pub mod session;
pub mod types;
pub mod validation;

pub use classifier::*;
pub use lookup::*;
pub use models::*;
pub use session::*;
pub use types::*;
pub use validation::*;
