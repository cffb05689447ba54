//! TraceLayer span maker that keeps credentials out of the logs.

use axum::http::Request;
use tower_http::trace::MakeSpan;
use tracing::Span;

/// Query parameter names whose values are redacted in logs.
const SENSITIVE_PARAMS: &[&str] = &["access_token", "token", "api_key", "password", "secret"];

/// `MakeSpan` that redacts sensitive query parameters from the logged URI
/// and records the caller's correlation id when one is sent.
#[derive(Clone, Debug, Default)]
pub struct SanitizedMakeSpan;

impl<B> MakeSpan<B> for SanitizedMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let correlation_id = request
            .headers()
            .get("x-correlation-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "http",
            method = %request.method(),
            uri = %sanitize_uri(request.uri()),
            version = ?request.version(),
            correlation_id = %correlation_id,
        )
    }
}

/// `/x?token=abc&page=1` becomes `/x?token=[REDACTED]&page=1`
fn sanitize_uri(uri: &axum::http::Uri) -> String {
    let query = match uri.query() {
        Some(q) => q,
        None => return uri.path().to_string(),
    };

    let sanitized_pairs: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if SENSITIVE_PARAMS.contains(&key.to_ascii_lowercase().as_str()) => {
                format!("{key}=[REDACTED]")
            }
            _ => pair.to_string(),
        })
        .collect();

    format!("{}?{}", uri.path(), sanitized_pairs.join("&"))
}
