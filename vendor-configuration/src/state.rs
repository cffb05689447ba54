//! State traits the HTTP handlers are generic over

use motorpool_common::api::Readiness;
use motorpool_common::Mediator;

/// Gives handlers access to the request pipelines.
///
/// Production uses `server::AppState`; tests plug in a state whose
/// pipelines run against in-memory repositories.
pub trait HasMediator: Readiness {
    fn mediator(&self) -> &Mediator;
}
