//! In-process request/handler dispatch
//!
//! A `Mediator` owns one `Pipeline` per request type. Each pipeline is a
//! handler wrapped by an ordered list of behaviors; the first behavior in the
//! list runs outermost and decides whether to call the rest of the chain
//! through `Next`.
//!
//! ```ignore
//! let mediator = Mediator::builder()
//!     .register(Pipeline::<GetCountryById>::standard(GetCountryByIdHandler::new(repo.clone()), vec![]))
//!     .build();
//! let outcome = mediator.send(GetCountryById { id }).await?;
//! ```

pub mod behaviors;

pub use behaviors::{LoggingBehavior, ValidationBehavior};

use crate::error::{AppError, Result};
use crate::validation::{RequestValidator, ValidationFailure};
use async_trait::async_trait;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A message dispatched through the mediator
pub trait Request: Debug + Send + Sync + 'static {
    type Response: PipelineResponse;

    /// Stable name used in logs and metrics
    const NAME: &'static str;
}

/// What the pipeline needs to know about a handler's response
pub trait PipelineResponse: Send + 'static {
    /// Response produced when validation short-circuits the pipeline
    fn from_validation_failures(failures: Vec<ValidationFailure>) -> Self;

    /// Low-cardinality label describing the response shape
    fn outcome_label(&self) -> &'static str;
}

#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync {
    async fn handle(&self, request: R) -> R::Response;
}

/// Cross-cutting step wrapped around a handler
#[async_trait]
pub trait PipelineBehavior<R: Request>: Send + Sync {
    async fn handle<'a>(&'a self, request: R, next: Next<'a, R>) -> R::Response;
}

/// Remainder of the pipeline after the current behavior
pub struct Next<'a, R: Request> {
    handler: &'a dyn RequestHandler<R>,
    behaviors: &'a [Arc<dyn PipelineBehavior<R>>],
}

impl<'a, R: Request> Next<'a, R> {
    pub fn run(self, request: R) -> BoxFuture<'a, R::Response> {
        match self.behaviors.split_first() {
            Some((behavior, rest)) => {
                let next = Next {
                    handler: self.handler,
                    behaviors: rest,
                };
                behavior.handle(request, next)
            }
            None => self.handler.handle(request),
        }
    }
}

/// Handler plus the behaviors wrapped around it
pub struct Pipeline<R: Request> {
    handler: Arc<dyn RequestHandler<R>>,
    behaviors: Vec<Arc<dyn PipelineBehavior<R>>>,
}

impl<R: Request> Pipeline<R> {
    /// Bare pipeline without behaviors
    pub fn new<H>(handler: H) -> Self
    where
        H: RequestHandler<R> + 'static,
    {
        Self {
            handler: Arc::new(handler),
            behaviors: Vec::new(),
        }
    }

    /// Logging around validation around the handler
    pub fn standard<H>(handler: H, validators: Vec<Arc<dyn RequestValidator<R>>>) -> Self
    where
        H: RequestHandler<R> + 'static,
    {
        Self::new(handler)
            .with_behavior(LoggingBehavior)
            .with_behavior(ValidationBehavior::new(validators))
    }

    /// Append a behavior; it runs inside every behavior added before it
    pub fn with_behavior<B>(mut self, behavior: B) -> Self
    where
        B: PipelineBehavior<R> + 'static,
    {
        self.behaviors.push(Arc::new(behavior));
        self
    }

    pub async fn send(&self, request: R) -> R::Response {
        Next {
            handler: self.handler.as_ref(),
            behaviors: &self.behaviors,
        }
        .run(request)
        .await
    }
}

/// Type-keyed registry of pipelines
#[derive(Clone, Default)]
pub struct Mediator {
    pipelines: Arc<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl Mediator {
    pub fn builder() -> MediatorBuilder {
        MediatorBuilder::default()
    }

    pub fn handles<R: Request>(&self) -> bool {
        self.pipelines.contains_key(&TypeId::of::<R>())
    }

    /// Dispatch a request to its pipeline
    pub async fn send<R: Request>(&self, request: R) -> Result<R::Response> {
        let pipeline = self
            .pipelines
            .get(&TypeId::of::<R>())
            .and_then(|pipeline| pipeline.downcast_ref::<Pipeline<R>>())
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!("No handler registered for {}", R::NAME))
            })?;
        Ok(pipeline.send(request).await)
    }
}

#[derive(Default)]
pub struct MediatorBuilder {
    pipelines: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl MediatorBuilder {
    /// Register the pipeline for `R`, replacing any earlier registration
    pub fn register<R: Request>(mut self, pipeline: Pipeline<R>) -> Self {
        self.pipelines.insert(TypeId::of::<R>(), Arc::new(pipeline));
        self
    }

    pub fn build(self) -> Mediator {
        Mediator {
            pipelines: Arc::new(self.pipelines),
        }
    }
}
