//! Data access layer

pub mod brand;
pub mod owner;
pub mod user;
pub mod vehicle;

pub use brand::{BrandRepository, BrandRepositoryImpl};
pub use owner::{OwnerRepository, OwnerRepositoryImpl};
pub use user::{UserRepository, UserRepositoryImpl};
pub use vehicle::{VehicleRepository, VehicleRepositoryImpl};

#[cfg(test)]
pub use brand::MockBrandRepository;
#[cfg(test)]
pub use owner::MockOwnerRepository;
#[cfg(test)]
pub use user::MockUserRepository;
#[cfg(test)]
pub use vehicle::MockVehicleRepository;

use motorpool_common::database::is_unique_violation;
use motorpool_common::AppError;

/// Unique-key violations become `Conflict` with the given message
pub(crate) fn map_write_error(err: sqlx::Error, conflict: impl FnOnce() -> String) -> AppError {
    if is_unique_violation(&err) {
        AppError::Conflict(conflict())
    } else {
        AppError::Database(err)
    }
}
