//! Application layer: mediator requests and their handlers

pub mod country;

use motorpool_common::mediator::MediatorBuilder;
use motorpool_common::events::EventBus;
use crate::repository::CountryRepository;
use std::sync::Arc;

/// Name used as `source` on published notifications
pub const SERVICE_NAME: &str = "vendor-configuration";

/// Register every pipeline this service handles
pub fn register<R>(
    builder: MediatorBuilder,
    repo: Arc<R>,
    events: Arc<dyn EventBus>,
) -> MediatorBuilder
where
    R: CountryRepository + 'static,
{
    country::register(builder, repo, events)
}
