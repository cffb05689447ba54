//! Country commands

use super::queries::ascii_letters;
use crate::application::SERVICE_NAME;
use crate::domain::{Country, CountryDto, StringUuid};
use crate::repository::CountryRepository;
use async_trait::async_trait;
use motorpool_common::events::{publish_all, EventBus};
use motorpool_common::mediator::{Request, RequestHandler};
use motorpool_common::{AppError, Outcome, Result};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

/// Body of create and update calls.
/// Missing fields deserialize as empty strings and are reported by validation.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CountryInput {
    #[serde(default)]
    pub iso2_code: String,
    #[serde(default)]
    pub iso3_code: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Validate)]
pub struct CreateCountry {
    #[validate(length(equal = 2), custom(function = "ascii_letters"))]
    pub iso2_code: String,
    #[validate(length(equal = 3), custom(function = "ascii_letters"))]
    pub iso3_code: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub actor: String,
}

impl CreateCountry {
    pub fn new(input: CountryInput, actor: impl Into<String>) -> Self {
        Self {
            iso2_code: input.iso2_code.trim().to_ascii_uppercase(),
            iso3_code: input.iso3_code.trim().to_ascii_uppercase(),
            name: input.name.trim().to_string(),
            actor: actor.into(),
        }
    }
}

impl Request for CreateCountry {
    type Response = Outcome<CountryDto>;
    const NAME: &'static str = "create_country";
}

#[derive(Debug, Clone, Validate)]
pub struct UpdateCountry {
    pub id: StringUuid,
    #[validate(length(equal = 2), custom(function = "ascii_letters"))]
    pub iso2_code: String,
    #[validate(length(equal = 3), custom(function = "ascii_letters"))]
    pub iso3_code: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub actor: String,
}

impl UpdateCountry {
    pub fn new(id: StringUuid, input: CountryInput, actor: impl Into<String>) -> Self {
        Self {
            id,
            iso2_code: input.iso2_code.trim().to_ascii_uppercase(),
            iso3_code: input.iso3_code.trim().to_ascii_uppercase(),
            name: input.name.trim().to_string(),
            actor: actor.into(),
        }
    }
}

impl Request for UpdateCountry {
    type Response = Outcome<CountryDto>;
    const NAME: &'static str = "update_country";
}

#[derive(Debug, Clone)]
pub struct DeleteCountry {
    pub id: StringUuid,
    pub actor: String,
}

impl Request for DeleteCountry {
    type Response = Outcome<CountryDto>;
    const NAME: &'static str = "delete_country";
}

pub struct CreateCountryHandler<R: CountryRepository> {
    repo: Arc<R>,
    events: Arc<dyn EventBus>,
}

impl<R: CountryRepository> CreateCountryHandler<R> {
    pub fn new(repo: Arc<R>, events: Arc<dyn EventBus>) -> Self {
        Self { repo, events }
    }

    async fn create(&self, request: CreateCountry) -> Result<CountryDto> {
        let mut country = Country::new(
            &request.iso2_code,
            &request.iso3_code,
            &request.name,
            &request.actor,
        )?;
        self.repo.create(&country).await?;

        tracing::info!(country_id = %country.id, iso2_code = %country.iso2_code, "Country created");
        publish_all(self.events.as_ref(), SERVICE_NAME, country.take_events()).await;
        Ok(country.into())
    }
}

#[async_trait]
impl<R: CountryRepository + 'static> RequestHandler<CreateCountry> for CreateCountryHandler<R> {
    async fn handle(&self, request: CreateCountry) -> Outcome<CountryDto> {
        self.create(request).await.into()
    }
}

pub struct UpdateCountryHandler<R: CountryRepository> {
    repo: Arc<R>,
    events: Arc<dyn EventBus>,
}

impl<R: CountryRepository> UpdateCountryHandler<R> {
    pub fn new(repo: Arc<R>, events: Arc<dyn EventBus>) -> Self {
        Self { repo, events }
    }

    async fn update(&self, request: UpdateCountry) -> Result<CountryDto> {
        let mut country = self
            .repo
            .find_by_id(request.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Country {} not found", request.id)))?;

        country.modify(
            &request.iso2_code,
            &request.iso3_code,
            &request.name,
            &request.actor,
        )?;
        self.repo.update(&country).await?;

        tracing::info!(country_id = %country.id, "Country updated");
        publish_all(self.events.as_ref(), SERVICE_NAME, country.take_events()).await;
        Ok(country.into())
    }
}

#[async_trait]
impl<R: CountryRepository + 'static> RequestHandler<UpdateCountry> for UpdateCountryHandler<R> {
    async fn handle(&self, request: UpdateCountry) -> Outcome<CountryDto> {
        self.update(request).await.into()
    }
}

pub struct DeleteCountryHandler<R: CountryRepository> {
    repo: Arc<R>,
    events: Arc<dyn EventBus>,
}

impl<R: CountryRepository> DeleteCountryHandler<R> {
    pub fn new(repo: Arc<R>, events: Arc<dyn EventBus>) -> Self {
        Self { repo, events }
    }

    async fn delete(&self, request: DeleteCountry) -> Result<CountryDto> {
        let not_found = || AppError::NotFound(format!("Country {} not found", request.id));

        let mut country = self
            .repo
            .find_by_id(request.id)
            .await?
            .ok_or_else(not_found)?;

        // Lost a race with another delete
        if !self.repo.delete(country.id).await? {
            return Err(not_found());
        }
        country.delete(&request.actor);

        tracing::info!(country_id = %country.id, "Country deleted");
        publish_all(self.events.as_ref(), SERVICE_NAME, country.take_events()).await;
        Ok(country.into())
    }
}

#[async_trait]
impl<R: CountryRepository + 'static> RequestHandler<DeleteCountry> for DeleteCountryHandler<R> {
    async fn handle(&self, request: DeleteCountry) -> Outcome<CountryDto> {
        self.delete(request).await.into()
    }
}
