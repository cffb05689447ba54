//! Server initialization and routing

use crate::api;
use crate::application;
use crate::config::Config;
use crate::openapi::ApiDoc;
use crate::repository::CountryRepositoryImpl;
use crate::state::HasMediator;
use anyhow::Result;
use axum::{middleware::from_fn, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use motorpool_common::api::{metrics_handler, Readiness};
use motorpool_common::middleware::{normalize_error_response, ObservabilityLayer, SanitizedMakeSpan};
use motorpool_common::{config::is_production, database, events::build_event_bus, Mediator};
use sqlx::MySqlPool;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: MySqlPool,
    pub mediator: Mediator,
}

impl Readiness for AppState {
    async fn check_ready(&self) -> bool {
        database::ping(&self.db_pool).await
    }
}

impl HasMediator for AppState {
    fn mediator(&self) -> &Mediator {
        &self.mediator
    }
}

/// Run the HTTP server
pub async fn run(config: Config, prometheus: Option<PrometheusHandle>) -> Result<()> {
    let db_pool = database::connect(&config.database).await?;
    info!("Connected to database");

    let country_repo = Arc::new(CountryRepositoryImpl::new(db_pool.clone()));
    let events = build_event_bus(&config.event_bus)?;

    let mediator = application::register(Mediator::builder(), country_repo, events).build();

    let http_addr = config.http_addr();
    let state = AppState {
        config: Arc::new(config),
        db_pool,
        mediator,
    };

    let app = build_router(state).merge(
        Router::new()
            .route("/metrics", get(metrics_handler))
            .with_state(Arc::new(prometheus)),
    );

    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

/// Build the HTTP router; generic so tests can run it against in-memory state
pub fn build_router<S: HasMediator>(state: S) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/health", get(api::health))
        .route("/ready", get(api::ready::<S>))
        .route(
            "/api/v1/countries",
            get(api::country::list::<S>).post(api::country::create::<S>),
        )
        .route(
            "/api/v1/countries/{id}",
            get(api::country::get::<S>)
                .put(api::country::update::<S>)
                .delete(api::country::delete::<S>),
        )
        .route(
            "/api/v1/countries/iso/{code}",
            get(api::country::get_by_iso_code::<S>),
        );

    if !is_production() {
        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::build()));
    }

    router
        .layer(from_fn(normalize_error_response))
        .layer(TraceLayer::new_for_http().make_span_with(SanitizedMakeSpan))
        .layer(ObservabilityLayer)
        .layer(cors)
        .with_state(state)
}
