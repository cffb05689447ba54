//! Country aggregate

use motorpool_common::events::DomainEvent;
use motorpool_common::{AppError, ModificationInfo, Result, StringUuid, ValidationFailure};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A country with its ISO 3166-1 alpha-2 and alpha-3 codes
#[derive(Debug, Clone, FromRow)]
pub struct Country {
    pub id: StringUuid,
    pub iso2_code: String,
    pub iso3_code: String,
    pub name: String,
    #[sqlx(flatten)]
    pub modification: ModificationInfo,
    /// Raised since the aggregate was loaded; never persisted
    #[sqlx(skip)]
    events: Vec<CountryEvent>,
}

/// Events raised by the country aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CountryEvent {
    Created {
        id: StringUuid,
        iso2_code: String,
        iso3_code: String,
        name: String,
    },
    Modified {
        id: StringUuid,
        iso2_code: String,
        iso3_code: String,
        name: String,
    },
    Deleted {
        id: StringUuid,
        deleted_by: String,
    },
}

impl DomainEvent for CountryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CountryEvent::Created { .. } => "country.created",
            CountryEvent::Modified { .. } => "country.modified",
            CountryEvent::Deleted { .. } => "country.deleted",
        }
    }

    fn aggregate_id(&self) -> String {
        match self {
            CountryEvent::Created { id, .. }
            | CountryEvent::Modified { id, .. }
            | CountryEvent::Deleted { id, .. } => id.to_string(),
        }
    }
}

impl Country {
    /// Build a new country, normalising codes to upper case
    pub fn new(iso2_code: &str, iso3_code: &str, name: &str, actor: &str) -> Result<Self> {
        let (iso2_code, iso3_code, name) = normalize(iso2_code, iso3_code, name)?;
        let id = StringUuid::new_v4();
        let mut country = Self {
            id,
            iso2_code,
            iso3_code,
            name,
            modification: ModificationInfo::created(actor),
            events: Vec::new(),
        };
        country.events.push(CountryEvent::Created {
            id,
            iso2_code: country.iso2_code.clone(),
            iso3_code: country.iso3_code.clone(),
            name: country.name.clone(),
        });
        Ok(country)
    }

    pub fn modify(
        &mut self,
        iso2_code: &str,
        iso3_code: &str,
        name: &str,
        actor: &str,
    ) -> Result<()> {
        let (iso2_code, iso3_code, name) = normalize(iso2_code, iso3_code, name)?;
        self.iso2_code = iso2_code;
        self.iso3_code = iso3_code;
        self.name = name;
        self.modification.touch(actor);
        self.events.push(CountryEvent::Modified {
            id: self.id,
            iso2_code: self.iso2_code.clone(),
            iso3_code: self.iso3_code.clone(),
            name: self.name.clone(),
        });
        Ok(())
    }

    pub fn delete(&mut self, actor: &str) {
        self.modification.touch(actor);
        self.events.push(CountryEvent::Deleted {
            id: self.id,
            deleted_by: actor.to_string(),
        });
    }

    pub fn events(&self) -> &[CountryEvent] {
        &self.events
    }

    /// Drain the pending events
    pub fn take_events(&mut self) -> Vec<CountryEvent> {
        std::mem::take(&mut self.events)
    }
}

fn normalize(iso2_code: &str, iso3_code: &str, name: &str) -> Result<(String, String, String)> {
    let iso2_code = iso2_code.trim().to_ascii_uppercase();
    let iso3_code = iso3_code.trim().to_ascii_uppercase();
    let name = name.trim().to_string();

    let mut failures = Vec::new();
    check_code("iso2_code", &iso2_code, 2, &mut failures);
    check_code("iso3_code", &iso3_code, 3, &mut failures);
    if name.is_empty() {
        failures.push(ValidationFailure::new("name", "required", "is required"));
    }

    if failures.is_empty() {
        Ok((iso2_code, iso3_code, name))
    } else {
        Err(AppError::Validation(failures))
    }
}

fn check_code(field: &str, code: &str, len: usize, failures: &mut Vec<ValidationFailure>) {
    if code.is_empty() {
        failures.push(ValidationFailure::new(field, "required", "is required"));
    } else if code.len() != len || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        failures.push(ValidationFailure::new(
            field,
            "format",
            format!("must be exactly {} letters", len),
        ));
    }
}

/// Country as exposed over the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CountryDto {
    pub id: StringUuid,
    pub iso2_code: String,
    pub iso3_code: String,
    pub name: String,
    #[serde(flatten)]
    pub modification: ModificationInfo,
}

impl From<&Country> for CountryDto {
    fn from(country: &Country) -> Self {
        Self {
            id: country.id,
            iso2_code: country.iso2_code.clone(),
            iso3_code: country.iso3_code.clone(),
            name: country.name.clone(),
            modification: country.modification.clone(),
        }
    }
}

impl From<Country> for CountryDto {
    fn from(country: Country) -> Self {
        Self {
            id: country.id,
            iso2_code: country.iso2_code,
            iso3_code: country.iso3_code,
            name: country.name,
            modification: country.modification,
        }
    }
}
