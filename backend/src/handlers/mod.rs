//! HTTP handlers for the AgriSense API

pub mod farmer;
pub mod fertilizer;
pub mod health;
pub mod recommendation;
pub mod reporting;
pub mod research;
pub mod soil;
pub mod trend;
pub mod weather;

pub use farmer::*;
pub use fertilizer::*;
pub use health::*;
pub use recommendation::*;
pub use reporting::*;
pub use research::*;
pub use soil::*;
pub use trend::*;
pub use weather::*;
