//! Business logic layer

pub mod brand;
pub mod owner;
pub mod user;
pub mod vehicle;

pub use brand::BrandService;
pub use owner::OwnerService;
pub use user::UserService;
pub use vehicle::VehicleService;
