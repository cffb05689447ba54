//! HTTP middleware shared by the Motorpool services
//!
//! - `ObservabilityLayer`: request id propagation and HTTP metrics
//! - `SanitizedMakeSpan`: request spans with secrets redacted
//! - `normalize_error_response`: problem-details body for framework errors

pub mod error_response;
pub mod metrics;
pub mod trace;

pub use error_response::normalize_error_response;
pub use metrics::ObservabilityLayer;
pub use trace::SanitizedMakeSpan;
