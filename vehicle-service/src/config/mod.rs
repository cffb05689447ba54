//! Configuration management

use anyhow::{Context, Result};
use motorpool_common::config::{DatabaseConfig, EventBusConfig, HttpConfig, TelemetryConfig};
use motorpool_common::http_client::ServiceClientConfig;
use std::env;

pub const DEFAULT_HTTP_PORT: u16 = 8082;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub telemetry: TelemetryConfig,
    pub event_bus: EventBusConfig,
    pub jwt: JwtConfig,
    /// vendor-configuration, consulted for country codes
    pub vendor_configuration: ServiceClientConfig,
}

/// Verification settings for access tokens issued by the identity provider
#[derive(Clone)]
pub struct JwtConfig {
    pub issuer: String,
    pub audience: String,
    /// RS256 public key; takes precedence over `secret`
    pub public_key_pem: Option<String>,
    /// HS256 shared secret
    pub secret: Option<String>,
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("public_key_pem", &self.public_key_pem.as_ref().map(|_| "<set>"))
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

impl JwtConfig {
    pub fn from_env() -> Result<Self> {
        let public_key_pem = match env::var("JWT_PUBLIC_KEY_PATH") {
            Ok(path) => Some(
                std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read JWT public key from {}", path))?,
            ),
            Err(_) => env::var("JWT_PUBLIC_KEY").ok().filter(|s| !s.is_empty()),
        };

        Ok(Self {
            issuer: env::var("JWT_ISSUER").context("JWT_ISSUER is required")?,
            audience: env::var("JWT_AUDIENCE").unwrap_or_else(|_| "motorpool".to_string()),
            public_key_pem,
            secret: env::var("JWT_SECRET").ok().filter(|s| !s.is_empty()),
            leeway_secs: env::var("JWT_LEEWAY_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        })
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut vendor_configuration = ServiceClientConfig::new(
            env::var("VENDOR_CONFIGURATION_URL")
                .unwrap_or_else(|_| "http://localhost:8081".to_string()),
        );
        if let Some(timeout) = env::var("VENDOR_CONFIGURATION_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            vendor_configuration.timeout_secs = timeout;
        }

        Ok(Self {
            http: HttpConfig::from_env(DEFAULT_HTTP_PORT)?,
            database: DatabaseConfig::from_env()?,
            telemetry: TelemetryConfig::from_env(crate::SERVICE_NAME),
            event_bus: EventBusConfig::from_env(),
            jwt: JwtConfig::from_env()?,
            vendor_configuration,
        })
    }

    pub fn http_addr(&self) -> String {
        self.http.addr()
    }
}
