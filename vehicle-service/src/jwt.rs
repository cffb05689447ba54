//! Access token verification
//!
//! Tokens are issued by an external identity provider. Only verification
//! happens here: signature (RS256 public key or HS256 shared secret),
//! expiry with a small leeway, issuer and audience.

use crate::config::JwtConfig;
use anyhow::{bail, Context};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use motorpool_common::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Claims read from an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Keycloak-style nested roles
    #[serde(default)]
    pub realm_access: Option<RealmAccess>,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

impl AccessClaims {
    /// Top-level and realm roles, deduplicated
    pub fn all_roles(&self) -> Vec<String> {
        let mut roles = self.roles.clone();
        if let Some(realm) = &self.realm_access {
            for role in &realm.roles {
                if !roles.contains(role) {
                    roles.push(role.clone());
                }
            }
        }
        roles
    }

    pub fn display_name(&self) -> Option<String> {
        self.name.clone().or_else(|| self.preferred_username.clone())
    }
}

#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &JwtConfig) -> anyhow::Result<Self> {
        let (algorithm, decoding_key) = match (&config.public_key_pem, &config.secret) {
            (Some(pem), _) => (
                Algorithm::RS256,
                DecodingKey::from_rsa_pem(pem.as_bytes())
                    .context("Failed to load JWT public key")?,
            ),
            (None, Some(secret)) => (Algorithm::HS256, DecodingKey::from_secret(secret.as_bytes())),
            (None, None) => bail!("Either JWT_PUBLIC_KEY(_PATH) or JWT_SECRET must be set"),
        };

        let mut validation = Validation::new(algorithm);
        validation.leeway = config.leeway_secs;
        validation.set_audience(&[&config.audience]);
        validation.set_issuer(&[&config.issuer]);

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    pub fn verify(&self, token: &str) -> Result<AccessClaims> {
        decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Token has expired".to_string())
                }
                _ => {
                    tracing::debug!(error = %e, "Rejected access token");
                    AppError::Unauthorized("Invalid token".to_string())
                }
            })
    }
}
