//! Service-to-service HTTP client helpers

use crate::error::{AppError, Result};
use metrics::counter;
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct ServiceClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Extra attempts for idempotent requests
    pub max_retries: u32,
    /// First backoff delay; doubled on every retry
    pub retry_backoff_ms: u64,
}

impl ServiceClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 10,
            max_retries: 2,
            retry_backoff_ms: 100,
        }
    }
}

/// JSON client bound to one upstream service
#[derive(Clone)]
pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
    retry_backoff: Duration,
}

impl ServiceClient {
    pub fn new(config: &ServiceClientConfig) -> Result<Self> {
        let parsed = Url::parse(&config.base_url).map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "Invalid service base URL '{}': {}",
                config.base_url,
                e
            ))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET a JSON document; 404 becomes `AppError::NotFound`
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_optional(path)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} not found upstream", path)))
    }

    /// GET a JSON document; 404 becomes `None`
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let response = self.send_with_retry(Method::GET, path).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(path, response).await.map(Some)
    }

    /// POST a JSON body; never retried
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| upstream_error(path, e))?;
        decode(path, response).await
    }

    async fn send_with_retry(&self, method: Method, path: &str) -> Result<reqwest::Response> {
        let url = self.url(path);
        let mut attempt = 0;
        loop {
            let result = self.client.request(method.clone(), &url).send().await;
            let retryable = match &result {
                Ok(response) => response.status().is_server_error(),
                Err(e) => e.is_connect() || e.is_timeout(),
            };

            if !retryable || attempt >= self.max_retries {
                let outcome = match &result {
                    Ok(response) if !response.status().is_server_error() => "ok",
                    _ => "error",
                };
                counter!("motorpool_upstream_requests_total", "result" => outcome).increment(1);
                return result.map_err(|e| upstream_error(path, e));
            }

            let delay = self.retry_backoff * 2u32.pow(attempt);
            tracing::warn!(
                url = %url,
                attempt = attempt + 1,
                delay_ms = delay.as_millis() as u64,
                "Retrying upstream request"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(AppError::NotFound(format!("{} not found upstream", path)));
    }
    if !status.is_success() {
        return Err(AppError::Upstream(format!(
            "{} returned status {}",
            path,
            status.as_u16()
        )));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| AppError::Upstream(format!("Invalid response from {}: {}", path, e)))
}

fn upstream_error(path: &str, err: reqwest::Error) -> AppError {
    AppError::Upstream(format!("Request to {} failed: {}", path, err))
}
