//! Domain models for the AgriSense soil monitoring platform

mod farmer;
mod fertilizer;
mod recommendation;
mod report;
mod soil;
mod threshold;
mod trend;
mod weather;

pub use farmer::*;
pub use fertilizer::*;
pub use recommendation::*;
pub use report::*;
pub use soil::*;
pub use threshold::*;
pub use trend::*;
pub use weather::*;
