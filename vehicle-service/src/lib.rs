//! Vehicle Service - vehicles, brands, owners and application users
//!
//! Every `/api/v1` route requires a bearer token; changes to fleet data
//! additionally require the `fleet-admin` role.

pub mod api;
pub mod config;
pub mod directory;
pub mod domain;
pub mod jwt;
pub mod middleware;
pub mod migration;
pub mod openapi;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;

/// Source name on published notifications
pub const SERVICE_NAME: &str = "vehicle-service";
