//! Domain models for the Crop Advisory Platform

mod alert;
mod crop;
mod recommendation;
mod telemetry;

pub use alert::*;
pub use crop::*;
pub use recommendation::*;
pub use telemetry::*;
