//! Standard pipeline behaviors

use super::{Next, PipelineBehavior, PipelineResponse, Request};
use crate::validation::RequestValidator;
use async_trait::async_trait;
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Runs every validator and short-circuits with a 400 when any rule fails.
pub struct ValidationBehavior<R: Request> {
    validators: Vec<Arc<dyn RequestValidator<R>>>,
}

impl<R: Request> ValidationBehavior<R> {
    pub fn new(validators: Vec<Arc<dyn RequestValidator<R>>>) -> Self {
        Self { validators }
    }
}

#[async_trait]
impl<R: Request> PipelineBehavior<R> for ValidationBehavior<R> {
    async fn handle<'a>(&'a self, request: R, next: Next<'a, R>) -> R::Response {
        let mut failures = Vec::new();
        for validator in &self.validators {
            failures.extend(validator.validate(&request).await);
        }

        if !failures.is_empty() {
            tracing::warn!(
                request = R::NAME,
                failures = failures.len(),
                "Request failed validation"
            );
            return R::Response::from_validation_failures(failures);
        }

        next.run(request).await
    }
}

/// Logs and measures every request passing through the pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingBehavior;

#[async_trait]
impl<R: Request> PipelineBehavior<R> for LoggingBehavior {
    async fn handle<'a>(&'a self, request: R, next: Next<'a, R>) -> R::Response {
        let span = tracing::info_span!("mediator", request = R::NAME);
        async move {
            tracing::debug!(payload = ?request, "Handling request");
            let start = Instant::now();

            let response = next.run(request).await;

            let elapsed = start.elapsed();
            let outcome = response.outcome_label();
            counter!("motorpool_mediator_requests_total", "request" => R::NAME, "outcome" => outcome)
                .increment(1);
            histogram!("motorpool_mediator_request_duration_seconds", "request" => R::NAME)
                .record(elapsed.as_secs_f64());
            tracing::info!(
                outcome,
                elapsed_ms = elapsed.as_millis() as u64,
                "Handled request"
            );

            response
        }
        .instrument(span)
        .await
    }
}
