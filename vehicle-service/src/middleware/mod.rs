//! Request extractors specific to the vehicle service

pub mod auth;

pub use auth::{AuthUser, FleetAdmin, FLEET_ADMIN_ROLE};
