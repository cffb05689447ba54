//! Error response normalization middleware
//!
//! Framework-level rejections (unknown route, wrong method, bad content type)
//! come back as text/plain. This middleware rewrites any non-JSON error
//! response into a problem-details body so clients see one error shape, and
//! stamps every problem with the request's correlation id as `trace_id`.

use crate::extract::RequestContext;
use crate::problem::{ProblemDetails, PROBLEM_CONTENT_TYPE};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Problem bodies are small; anything larger is passed through untouched
const MAX_PROBLEM_BYTES: usize = 64 * 1024;

pub async fn normalize_error_response(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let trace_id = RequestContext::from_headers(request.headers()).correlation_id;
    let response = next.run(request).await;

    let status = response.status();

    // Probes answer in plain text
    if path == "/health" || path == "/ready" {
        return response;
    }

    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.starts_with(PROBLEM_CONTENT_TYPE) {
        return attach_trace_id(response, trace_id, &path).await;
    }

    if content_type.contains("json") {
        return response;
    }

    generic_problem(status, &path)
        .with_trace_id(trace_id)
        .into_response()
}

async fn attach_trace_id(response: Response, trace_id: String, path: &str) -> Response {
    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_PROBLEM_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Failed to read problem body: {}", e);
            return generic_problem(parts.status, path)
                .with_trace_id(trace_id)
                .into_response();
        }
    };

    let mut problem: ProblemDetails = match serde_json::from_slice(&bytes) {
        Ok(problem) => problem,
        Err(_) => return Response::from_parts(parts, Body::from(bytes)),
    };
    if problem.trace_id.is_some() {
        return Response::from_parts(parts, Body::from(bytes));
    }
    problem.trace_id = Some(trace_id);

    match serde_json::to_vec(&problem) {
        Ok(body) => {
            parts.headers.remove(header::CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(body))
        }
        Err(_) => Response::from_parts(parts, Body::from(bytes)),
    }
}

fn generic_problem(status: StatusCode, path: &str) -> ProblemDetails {
    let detail = match status {
        StatusCode::BAD_REQUEST => "Invalid request",
        StatusCode::UNAUTHORIZED => "Authentication required",
        StatusCode::FORBIDDEN => "Access denied",
        StatusCode::NOT_FOUND => "No resource matches the request path",
        StatusCode::METHOD_NOT_ALLOWED => "Method not allowed",
        StatusCode::CONFLICT => "Resource conflict",
        StatusCode::UNPROCESSABLE_ENTITY => "The request could not be processed",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "Unsupported content type",
        _ if status.is_client_error() => "Client error",
        _ => "An internal error occurred",
    };

    let title = status.canonical_reason().unwrap_or("Error");
    ProblemDetails::new(status, title)
        .with_detail(detail)
        .with_instance(path)
}
