//! HTTP API handlers for esa-quiz

pub mod health;
pub mod quiz;

pub use health::health_routes;
pub use quiz::quiz_routes;
