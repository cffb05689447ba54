//! RFC 7807 problem details
//!
//! Every error leaving a Motorpool service is rendered as
//! `application/problem+json`, whether it comes from a failed validation,
//! an `Outcome::Fault`, an `AppError`, or a framework rejection.

use crate::validation::ValidationFailure;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

const TYPE_BAD_REQUEST: &str = "https://tools.ietf.org/html/rfc7231#section-6.5.1";
const TYPE_UNAUTHORIZED: &str = "https://tools.ietf.org/html/rfc7235#section-3.1";
const TYPE_FORBIDDEN: &str = "https://tools.ietf.org/html/rfc7231#section-6.5.3";
const TYPE_NOT_FOUND: &str = "https://tools.ietf.org/html/rfc7231#section-6.5.4";
const TYPE_CONFLICT: &str = "https://tools.ietf.org/html/rfc7231#section-6.5.8";
const TYPE_UNSUPPORTED_MEDIA: &str = "https://tools.ietf.org/html/rfc7231#section-6.5.13";
const TYPE_INTERNAL: &str = "https://tools.ietf.org/html/rfc7231#section-6.6.1";
const TYPE_BAD_GATEWAY: &str = "https://tools.ietf.org/html/rfc7231#section-6.6.3";

/// Machine-readable error payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Field name -> messages, populated for validation failures
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl ProblemDetails {
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            problem_type: type_for(status).to_string(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            errors: BTreeMap::new(),
            trace_id: None,
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request").with_detail(detail)
    }

    /// 400 carrying one entry per failing field
    pub fn validation(failures: Vec<ValidationFailure>) -> Self {
        let mut errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for failure in failures {
            errors.entry(failure.field).or_default().push(failure.message);
        }
        Self {
            errors,
            ..Self::new(
                StatusCode::BAD_REQUEST,
                "One or more validation errors occurred.",
            )
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found").with_detail(detail)
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "Conflict").with_detail(detail)
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "An error occurred while processing your request.",
        )
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

fn type_for(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => TYPE_BAD_REQUEST,
        StatusCode::UNAUTHORIZED => TYPE_UNAUTHORIZED,
        StatusCode::FORBIDDEN => TYPE_FORBIDDEN,
        StatusCode::NOT_FOUND => TYPE_NOT_FOUND,
        StatusCode::CONFLICT => TYPE_CONFLICT,
        StatusCode::UNSUPPORTED_MEDIA_TYPE => TYPE_UNSUPPORTED_MEDIA,
        StatusCode::BAD_GATEWAY => TYPE_BAD_GATEWAY,
        _ if status.is_client_error() => TYPE_BAD_REQUEST,
        _ => TYPE_INTERNAL,
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        response
    }
}
