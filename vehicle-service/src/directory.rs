//! Country lookups against vendor-configuration

use async_trait::async_trait;
use motorpool_common::http_client::ServiceClient;
use motorpool_common::Result;
use serde::Deserialize;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryDirectory: Send + Sync {
    /// Whether `code` (ISO2 or ISO3) names a configured country
    async fn country_exists(&self, code: &str) -> Result<bool>;
}

/// The fields of vendor-configuration's country payload used here
#[derive(Debug, Deserialize)]
struct CountrySummary {
    iso2_code: String,
    iso3_code: String,
}

pub struct HttpCountryDirectory {
    client: ServiceClient,
}

impl HttpCountryDirectory {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CountryDirectory for HttpCountryDirectory {
    async fn country_exists(&self, code: &str) -> Result<bool> {
        let code = code.trim().to_ascii_uppercase();
        let country: Option<CountrySummary> = self
            .client
            .get_optional(&format!("/api/v1/countries/iso/{}", code))
            .await?;

        Ok(country.is_some_and(|c| c.iso2_code == code || c.iso3_code == code))
    }
}
