//! Vehicle owner domain model

use super::{clean_optional, ModificationInfo, StringUuid};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct VehicleOwner {
    pub id: StringUuid,
    pub first_name: String,
    pub last_name: String,
    /// Stored lower-cased; unique across owners
    pub email: String,
    pub phone: Option<String>,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub modification: ModificationInfo,
}

impl VehicleOwner {
    pub fn new(input: &CreateOwnerInput, actor: &str) -> Self {
        Self {
            id: StringUuid::new_v4(),
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email: normalize_email(&input.email),
            phone: clean_optional(input.phone.clone()),
            modification: ModificationInfo::created(actor),
        }
    }

    pub fn apply(&mut self, input: &UpdateOwnerInput, actor: &str) {
        if let Some(first_name) = &input.first_name {
            self.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = &input.last_name {
            self.last_name = last_name.trim().to_string();
        }
        if let Some(email) = &input.email {
            self.email = normalize_email(email);
        }
        if input.phone.is_some() {
            self.phone = clean_optional(input.phone.clone());
        }
        self.modification.touch(actor);
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOwnerInput {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
}

/// Partial update; an empty `phone` clears the number
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateOwnerInput {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
}
