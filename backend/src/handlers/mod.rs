//! HTTP request handlers

pub mod auth;
pub mod health;
pub mod monitoring;
pub mod recommendation;
pub mod session;

pub use auth::{grant_location, login};
pub use health::health_check;
pub use monitoring::monitoring_view;
pub use recommendation::recommend;
pub use session::{get_session, navigate};
