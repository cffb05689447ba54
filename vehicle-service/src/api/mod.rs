//! REST API handlers

pub mod brand;
pub mod owner;
pub mod user;
pub mod vehicle;

pub use motorpool_common::api::{health, ready, HealthResponse};

use axum::http::{header, HeaderMap, HeaderValue};

/// `Location` header for a newly created resource
pub(crate) fn location_header(path: String) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&path) {
        headers.insert(header::LOCATION, value);
    }
    headers
}
