//! Motorpool Common - shared plumbing for the Motorpool services
//!
//! This crate hosts the pieces every service needs: the in-process mediator
//! with its validation and logging behaviors, the `Outcome` result-union and
//! its HTTP mapping, RFC 7807 problem details, model binding extractors, the
//! event-bus notification helper, an HTTP client for calling sibling
//! services, and the telemetry/config/database bootstrap.

pub mod api;
pub mod audit;
pub mod config;
pub mod database;
pub mod error;
pub mod events;
pub mod extract;
pub mod http_client;
pub mod ids;
pub mod mediator;
pub mod middleware;
pub mod outcome;
pub mod problem;
pub mod telemetry;
pub mod validation;

// Re-export commonly used types
pub use audit::ModificationInfo;
pub use error::{AppError, Result};
pub use ids::StringUuid;
pub use mediator::{Mediator, Pipeline, Request, RequestHandler};
pub use outcome::Outcome;
pub use problem::ProblemDetails;
pub use validation::ValidationFailure;
