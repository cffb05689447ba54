//! Country queries

use crate::domain::{CountryDto, StringUuid};
use crate::repository::CountryRepository;
use async_trait::async_trait;
use motorpool_common::mediator::{Request, RequestHandler};
use motorpool_common::Outcome;
use std::sync::Arc;
use validator::{Validate, ValidationError};

/// All countries ordered by name
#[derive(Debug, Clone)]
pub struct GetCountries;

impl Request for GetCountries {
    type Response = Outcome<CountryDto>;
    const NAME: &'static str = "get_countries";
}

pub struct GetCountriesHandler<R: CountryRepository> {
    repo: Arc<R>,
}

impl<R: CountryRepository> GetCountriesHandler<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: CountryRepository + 'static> RequestHandler<GetCountries> for GetCountriesHandler<R> {
    async fn handle(&self, _request: GetCountries) -> Outcome<CountryDto> {
        match self.repo.list().await {
            Ok(countries) => Outcome::List(countries.into_iter().map(CountryDto::from).collect()),
            Err(e) => e.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GetCountryById {
    pub id: StringUuid,
}

impl Request for GetCountryById {
    type Response = Outcome<CountryDto>;
    const NAME: &'static str = "get_country_by_id";
}

pub struct GetCountryByIdHandler<R: CountryRepository> {
    repo: Arc<R>,
}

impl<R: CountryRepository> GetCountryByIdHandler<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: CountryRepository + 'static> RequestHandler<GetCountryById> for GetCountryByIdHandler<R> {
    async fn handle(&self, request: GetCountryById) -> Outcome<CountryDto> {
        match self.repo.find_by_id(request.id).await {
            Ok(country) => Outcome::from_option(country.map(CountryDto::from)),
            Err(e) => e.into(),
        }
    }
}

/// Lookup by either ISO code
#[derive(Debug, Clone, Validate)]
pub struct GetCountryByIsoCode {
    #[validate(
        length(min = 2, max = 3, message = "must be 2 or 3 letters"),
        custom(function = "ascii_letters")
    )]
    pub code: String,
}

impl Request for GetCountryByIsoCode {
    type Response = Outcome<CountryDto>;
    const NAME: &'static str = "get_country_by_iso_code";
}

pub(crate) fn ascii_letters(value: &str) -> std::result::Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(ValidationError::new("letters").with_message("must contain letters only".into()))
    }
}

pub struct GetCountryByIsoCodeHandler<R: CountryRepository> {
    repo: Arc<R>,
}

impl<R: CountryRepository> GetCountryByIsoCodeHandler<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: CountryRepository + 'static> RequestHandler<GetCountryByIsoCode>
    for GetCountryByIsoCodeHandler<R>
{
    async fn handle(&self, request: GetCountryByIsoCode) -> Outcome<CountryDto> {
        match self.repo.find_by_iso_code(&request.code).await {
            Ok(country) => Outcome::from_option(country.map(CountryDto::from)),
            Err(e) => e.into(),
        }
    }
}
