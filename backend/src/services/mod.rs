//! Business logic services for the Crop Advisory Platform

pub mod monitoring;
pub mod recommendation;
pub mod session;

pub use monitoring::MonitoringService;
pub use recommendation::RecommendationService;
pub use session::SessionService;
