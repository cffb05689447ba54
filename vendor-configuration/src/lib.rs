//! Vendor Configuration - country reference data for the Motorpool platform
//!
//! Countries are served over REST; every call goes through the mediator
//! pipelines registered in `application`.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod migration;
pub mod openapi;
pub mod repository;
pub mod server;
pub mod state;
