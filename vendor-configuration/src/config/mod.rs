//! Configuration management

use anyhow::Result;
use motorpool_common::config::{DatabaseConfig, EventBusConfig, HttpConfig, TelemetryConfig};

pub const DEFAULT_HTTP_PORT: u16 = 8081;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub telemetry: TelemetryConfig,
    pub event_bus: EventBusConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http: HttpConfig::from_env(DEFAULT_HTTP_PORT)?,
            database: DatabaseConfig::from_env()?,
            telemetry: TelemetryConfig::from_env(crate::application::SERVICE_NAME),
            event_bus: EventBusConfig::from_env(),
        })
    }

    pub fn http_addr(&self) -> String {
        self.http.addr()
    }
}
