//! State traits the HTTP handlers are generic over
//!
//! Production wires MySQL repositories and the HTTP country directory into
//! `server::AppState`; integration tests provide in-memory implementations.

use crate::directory::CountryDirectory;
use crate::jwt::TokenVerifier;
use crate::repository::{BrandRepository, OwnerRepository, UserRepository, VehicleRepository};
use crate::service::{BrandService, OwnerService, UserService, VehicleService};
use motorpool_common::api::Readiness;

pub trait HasServices: Readiness {
    type BrandRepo: BrandRepository;
    type OwnerRepo: OwnerRepository;
    type VehicleRepo: VehicleRepository;
    type UserRepo: UserRepository;
    type Directory: CountryDirectory;

    fn brand_service(&self) -> &BrandService<Self::BrandRepo, Self::VehicleRepo, Self::Directory>;

    fn owner_service(&self) -> &OwnerService<Self::OwnerRepo, Self::VehicleRepo>;

    fn vehicle_service(
        &self,
    ) -> &VehicleService<Self::VehicleRepo, Self::BrandRepo, Self::OwnerRepo>;

    fn user_service(&self) -> &UserService<Self::UserRepo>;

    /// Verifier for bearer tokens on `/api/v1` routes
    fn token_verifier(&self) -> &TokenVerifier;
}
