//! Vehicle domain model

use super::{clean_optional, ModificationInfo, StringUuid};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

pub const VIN_LENGTH: usize = 17;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Vehicle {
    pub id: StringUuid,
    /// Upper-cased, unique across vehicles
    pub vin: String,
    pub license_plate: String,
    pub model: String,
    pub model_year: i32,
    pub color: Option<String>,
    pub brand_id: StringUuid,
    pub owner_id: Option<StringUuid>,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub modification: ModificationInfo,
}

impl Vehicle {
    pub fn new(input: &CreateVehicleInput, actor: &str) -> Self {
        Self {
            id: StringUuid::new_v4(),
            vin: normalize_vin(&input.vin),
            license_plate: normalize_plate(&input.license_plate),
            model: input.model.trim().to_string(),
            model_year: input.model_year,
            color: clean_optional(input.color.clone()),
            brand_id: input.brand_id,
            owner_id: input.owner_id,
            modification: ModificationInfo::created(actor),
        }
    }

    pub fn apply(&mut self, input: &UpdateVehicleInput, actor: &str) {
        if let Some(plate) = &input.license_plate {
            self.license_plate = normalize_plate(plate);
        }
        if let Some(model) = &input.model {
            self.model = model.trim().to_string();
        }
        if let Some(year) = input.model_year {
            self.model_year = year;
        }
        if input.color.is_some() {
            self.color = clean_optional(input.color.clone());
        }
        if let Some(brand_id) = input.brand_id {
            self.brand_id = brand_id;
        }
        if let Some(owner_id) = input.owner_id {
            self.owner_id = owner_id;
        }
        self.modification.touch(actor);
    }
}

pub fn normalize_vin(vin: &str) -> String {
    vin.trim().to_ascii_uppercase()
}

fn normalize_plate(plate: &str) -> String {
    plate.trim().to_ascii_uppercase()
}

/// 17 alphanumerics; I, O and Q are never used in a VIN
pub fn validate_vin(vin: &str) -> Result<(), ValidationError> {
    let vin = vin.trim();
    let valid = vin.len() == VIN_LENGTH
        && vin.chars().all(|c| {
            c.is_ascii_alphanumeric() && !matches!(c.to_ascii_uppercase(), 'I' | 'O' | 'Q')
        });
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("vin")
            .with_message("must be 17 letters or digits, excluding I, O and Q".into()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateVehicleInput {
    #[validate(custom(function = "validate_vin"))]
    pub vin: String,
    #[validate(length(min = 1, max = 16))]
    pub license_plate: String,
    #[validate(length(min = 1, max = 100))]
    pub model: String,
    #[validate(range(min = 1886, max = 2100))]
    pub model_year: i32,
    #[validate(length(max = 32))]
    pub color: Option<String>,
    pub brand_id: StringUuid,
    pub owner_id: Option<StringUuid>,
}

/// Partial update. The VIN is immutable.
/// `owner_id: null` removes the owner, an absent `owner_id` keeps it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateVehicleInput {
    #[validate(length(min = 1, max = 16))]
    pub license_plate: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,
    #[validate(range(min = 1886, max = 2100))]
    pub model_year: Option<i32>,
    #[validate(length(max = 32))]
    pub color: Option<String>,
    pub brand_id: Option<StringUuid>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, format = Uuid)]
    pub owner_id: Option<Option<StringUuid>>,
}

/// Distinguishes `"field": null` (Some(None)) from a missing field (None)
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query filters for vehicle listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VehicleFilter {
    #[param(value_type = Option<String>, format = Uuid)]
    pub brand_id: Option<StringUuid>,
    #[param(value_type = Option<String>, format = Uuid)]
    pub owner_id: Option<StringUuid>,
}

impl VehicleFilter {
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        self.brand_id.map_or(true, |id| vehicle.brand_id == id)
            && self.owner_id.map_or(true, |id| vehicle.owner_id == Some(id))
    }
}
