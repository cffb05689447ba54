//! Domain models

pub mod brand;
pub mod events;
pub mod owner;
pub mod user;
pub mod vehicle;

pub use brand::{CreateBrandInput, UpdateBrandInput, VehicleBrand};
pub use events::{ChangeKind, EntityKind, FleetEvent};
pub use motorpool_common::{ModificationInfo, StringUuid};
pub use owner::{CreateOwnerInput, UpdateOwnerInput, VehicleOwner};
pub use user::ApplicationUser;
pub use vehicle::{CreateVehicleInput, UpdateVehicleInput, Vehicle, VehicleFilter};

use validator::ValidationError;

/// ISO 3166-1 alpha-2 or alpha-3 code, case-insensitive
pub(crate) fn validate_country_code(code: &str) -> Result<(), ValidationError> {
    let len_ok = code.len() == 2 || code.len() == 3;
    if len_ok && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(ValidationError::new("country_code")
            .with_message("must be a 2 or 3 letter ISO country code".into()))
    }
}

/// Trim, and drop the value entirely when nothing is left
pub(crate) fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
