//! Vehicle brand domain model

use super::{validate_country_code, ModificationInfo, StringUuid};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A manufacturer, e.g. Volvo (SE)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct VehicleBrand {
    pub id: StringUuid,
    pub name: String,
    /// ISO code of a country known to vendor-configuration
    pub country_code: String,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub modification: ModificationInfo,
}

impl VehicleBrand {
    pub fn new(input: &CreateBrandInput, actor: &str) -> Self {
        Self {
            id: StringUuid::new_v4(),
            name: input.name.trim().to_string(),
            country_code: input.country_code.trim().to_ascii_uppercase(),
            modification: ModificationInfo::created(actor),
        }
    }

    pub fn apply(&mut self, input: &UpdateBrandInput, actor: &str) {
        if let Some(name) = &input.name {
            self.name = name.trim().to_string();
        }
        if let Some(code) = &input.country_code {
            self.country_code = code.trim().to_ascii_uppercase();
        }
        self.modification.touch(actor);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateBrandInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(custom(function = "validate_country_code"))]
    pub country_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateBrandInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_country_code"))]
    pub country_code: Option<String>,
}
