//! Repository-backed validation rules

use super::commands::{CreateCountry, UpdateCountry};
use crate::domain::StringUuid;
use crate::repository::CountryRepository;
use async_trait::async_trait;
use motorpool_common::validation::RequestValidator;
use motorpool_common::ValidationFailure;
use std::sync::Arc;

/// Rejects ISO codes already used by another country.
///
/// Codes that fail the field rules are skipped so a malformed code is not
/// reported twice. Repository errors are logged and treated as "not in use";
/// the unique keys still catch the duplicate when the write happens. An
/// update of a missing country is left to the handler, which answers 404.
pub struct IsoCodeUniqueness<R: CountryRepository> {
    repo: Arc<R>,
}

impl<R: CountryRepository> IsoCodeUniqueness<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    async fn check(
        &self,
        iso2_code: &str,
        iso3_code: &str,
        exclude_id: Option<StringUuid>,
    ) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();

        if iso2_code.len() == 2 {
            match self.repo.exists_iso2(iso2_code, exclude_id).await {
                Ok(true) => failures.push(ValidationFailure::new(
                    "iso2_code",
                    "unique",
                    format!("ISO2 code '{}' is already in use", iso2_code),
                )),
                Ok(false) => {}
                Err(e) => tracing::warn!("ISO2 uniqueness check failed: {}", e),
            }
        }

        if iso3_code.len() == 3 {
            match self.repo.exists_iso3(iso3_code, exclude_id).await {
                Ok(true) => failures.push(ValidationFailure::new(
                    "iso3_code",
                    "unique",
                    format!("ISO3 code '{}' is already in use", iso3_code),
                )),
                Ok(false) => {}
                Err(e) => tracing::warn!("ISO3 uniqueness check failed: {}", e),
            }
        }

        failures
    }
}

#[async_trait]
impl<R: CountryRepository + 'static> RequestValidator<CreateCountry> for IsoCodeUniqueness<R> {
    async fn validate(&self, request: &CreateCountry) -> Vec<ValidationFailure> {
        self.check(&request.iso2_code, &request.iso3_code, None).await
    }
}

#[async_trait]
impl<R: CountryRepository + 'static> RequestValidator<UpdateCountry> for IsoCodeUniqueness<R> {
    async fn validate(&self, request: &UpdateCountry) -> Vec<ValidationFailure> {
        match self.repo.find_by_id(request.id).await {
            Ok(None) => return Vec::new(),
            Ok(Some(_)) => {}
            Err(e) => tracing::warn!("Country lookup before uniqueness check failed: {}", e),
        }
        self.check(&request.iso2_code, &request.iso3_code, Some(request.id))
            .await
    }
}
