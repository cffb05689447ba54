//! REST API handlers

pub mod country;

pub use motorpool_common::api::{health, ready, HealthResponse};
