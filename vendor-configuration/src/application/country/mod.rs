//! Country queries and commands
//!
//! Every request goes through `Pipeline::standard`: logging, then the field
//! rules plus any repository-backed validators, then the handler.

pub mod commands;
pub mod queries;
pub mod validators;

pub use commands::{
    CountryInput, CreateCountry, CreateCountryHandler, DeleteCountry, DeleteCountryHandler,
    UpdateCountry, UpdateCountryHandler,
};
pub use queries::{
    GetCountries, GetCountriesHandler, GetCountryById, GetCountryByIdHandler, GetCountryByIsoCode,
    GetCountryByIsoCodeHandler,
};
pub use validators::IsoCodeUniqueness;

use crate::repository::CountryRepository;
use motorpool_common::events::EventBus;
use motorpool_common::mediator::{MediatorBuilder, Pipeline};
use motorpool_common::validation::FieldRules;
use std::sync::Arc;

pub fn register<R>(
    builder: MediatorBuilder,
    repo: Arc<R>,
    events: Arc<dyn EventBus>,
) -> MediatorBuilder
where
    R: CountryRepository + 'static,
{
    let uniqueness = Arc::new(IsoCodeUniqueness::new(repo.clone()));

    builder
        .register(Pipeline::<GetCountries>::standard(
            GetCountriesHandler::new(repo.clone()),
            vec![],
        ))
        .register(Pipeline::<GetCountryById>::standard(
            GetCountryByIdHandler::new(repo.clone()),
            vec![],
        ))
        .register(Pipeline::<GetCountryByIsoCode>::standard(
            GetCountryByIsoCodeHandler::new(repo.clone()),
            vec![Arc::new(FieldRules)],
        ))
        .register(Pipeline::<CreateCountry>::standard(
            CreateCountryHandler::new(repo.clone(), events.clone()),
            vec![Arc::new(FieldRules), uniqueness.clone()],
        ))
        .register(Pipeline::<UpdateCountry>::standard(
            UpdateCountryHandler::new(repo.clone(), events.clone()),
            vec![Arc::new(FieldRules), uniqueness],
        ))
        .register(Pipeline::<DeleteCountry>::standard(
            DeleteCountryHandler::new(repo, events),
            vec![],
        ))
}
