//! Configuration blocks shared by the Motorpool services
//!
//! Every service composes these blocks into its own `Config`. Values come
//! from environment variables; `.env` files are loaded by the binaries
//! through `dotenvy` before anything here runs.

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl HttpConfig {
    pub fn from_env(default_port: u16) -> Result<Self> {
        Ok(Self {
            host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| default_port.to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: env::var("DATABASE_URL").context("DATABASE_URL is required")?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .unwrap_or(2),
        })
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub service_name: String,
    /// `json` or `pretty`
    pub log_format: String,
    pub metrics_enabled: bool,
}

impl TelemetryConfig {
    pub fn from_env(service_name: &str) -> Self {
        Self {
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| service_name.to_string()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            metrics_enabled: parse_bool(env::var("METRICS_ENABLED").ok().as_deref(), true),
        }
    }
}

/// Where domain event notifications go
#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// `false` drops every notification
    pub enabled: bool,
    /// `None` keeps notifications in-process
    pub endpoint: Option<String>,
    /// HMAC key for the `X-Event-Signature` header
    pub secret: Option<String>,
    pub timeout_secs: u64,
}

impl EventBusConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: parse_bool(env::var("EVENT_BUS_ENABLED").ok().as_deref(), true),
            endpoint: env::var("EVENT_BUS_ENDPOINT").ok().filter(|s| !s.is_empty()),
            secret: env::var("EVENT_BUS_SECRET").ok().filter(|s| !s.is_empty()),
            timeout_secs: env::var("EVENT_BUS_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: None,
            secret: None,
            timeout_secs: 5,
        }
    }
}

/// `ENVIRONMENT=production` turns off developer surfaces such as Swagger UI
pub fn is_production() -> bool {
    env::var("ENVIRONMENT")
        .map(|v| v.eq_ignore_ascii_case("production"))
        .unwrap_or(false)
}

pub fn parse_bool(value: Option<&str>, default: bool) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        _ => default,
    }
}
