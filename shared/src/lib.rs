//! Shared types and domain logic for the AgriSense soil monitoring platform
//!
//! This crate contains the soil-health classifier, trend aggregation and
//! recommendation request assembly shared between the backend, the
//! browser front-end (via WASM), and other components of the system.

pub mod models;
pub mod state;
pub mod types;
pub mod validation;

pub use models::*;
pub use state::*;
pub use types::*;
pub use validation::*;
