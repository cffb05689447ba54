//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::directory::HttpCountryDirectory;
use crate::jwt::TokenVerifier;
use crate::openapi::ApiDoc;
use crate::repository::{
    BrandRepositoryImpl, OwnerRepositoryImpl, UserRepositoryImpl, VehicleRepositoryImpl,
};
use crate::service::{BrandService, OwnerService, UserService, VehicleService};
use crate::state::HasServices;
use anyhow::Result;
use axum::{middleware::from_fn, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use motorpool_common::api::{metrics_handler, Readiness};
use motorpool_common::http_client::ServiceClient;
use motorpool_common::middleware::{normalize_error_response, ObservabilityLayer, SanitizedMakeSpan};
use motorpool_common::{config::is_production, database, events::build_event_bus};
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
    pub brand_service:
        Arc<BrandService<BrandRepositoryImpl, VehicleRepositoryImpl, HttpCountryDirectory>>,
    pub owner_service: Arc<OwnerService<OwnerRepositoryImpl, VehicleRepositoryImpl>>,
    pub vehicle_service:
        Arc<VehicleService<VehicleRepositoryImpl, BrandRepositoryImpl, OwnerRepositoryImpl>>,
    pub user_service: Arc<UserService<UserRepositoryImpl>>,
    pub token_verifier: Arc<TokenVerifier>,
}

impl Readiness for AppState {
    async fn check_ready(&self) -> bool {
        database::ping(&self.db_pool).await
    }
}

impl HasServices for AppState {
    type BrandRepo = BrandRepositoryImpl;
    type OwnerRepo = OwnerRepositoryImpl;
    type VehicleRepo = VehicleRepositoryImpl;
    type UserRepo = UserRepositoryImpl;
    type Directory = HttpCountryDirectory;

    fn brand_service(
        &self,
    ) -> &BrandService<BrandRepositoryImpl, VehicleRepositoryImpl, HttpCountryDirectory> {
        &self.brand_service
    }

    fn owner_service(&self) -> &OwnerService<OwnerRepositoryImpl, VehicleRepositoryImpl> {
        &self.owner_service
    }

    fn vehicle_service(
        &self,
    ) -> &VehicleService<VehicleRepositoryImpl, BrandRepositoryImpl, OwnerRepositoryImpl> {
        &self.vehicle_service
    }

    fn user_service(&self) -> &UserService<UserRepositoryImpl> {
        &self.user_service
    }

    fn token_verifier(&self) -> &TokenVerifier {
        &self.token_verifier
    }
}

/// Run the HTTP server
pub async fn run(config: Config, prometheus: Option<PrometheusHandle>) -> Result<()> {
    let token_verifier = Arc::new(TokenVerifier::new(&config.jwt)?);

    let db_pool = database::connect(&config.database).await?;
    info!("Connected to database");

    let brand_repo = Arc::new(BrandRepositoryImpl::new(db_pool.clone()));
    let owner_repo = Arc::new(OwnerRepositoryImpl::new(db_pool.clone()));
    let vehicle_repo = Arc::new(VehicleRepositoryImpl::new(db_pool.clone()));
    let user_repo = Arc::new(UserRepositoryImpl::new(db_pool.clone()));

    let countries = Arc::new(HttpCountryDirectory::new(ServiceClient::new(
        &config.vendor_configuration,
    )?));
    info!(
        "Country lookups go to {}",
        config.vendor_configuration.base_url
    );

    let events = build_event_bus(&config.event_bus)?;

    let http_addr = config.http_addr();
    let state = AppState {
        config: Arc::new(config),
        db_pool,
        brand_service: Arc::new(BrandService::new(
            brand_repo.clone(),
            vehicle_repo.clone(),
            countries,
            events.clone(),
        )),
        owner_service: Arc::new(OwnerService::new(
            owner_repo.clone(),
            vehicle_repo.clone(),
            events.clone(),
        )),
        vehicle_service: Arc::new(VehicleService::new(
            vehicle_repo,
            brand_repo,
            owner_repo,
            events,
        )),
        user_service: Arc::new(UserService::new(user_repo)),
        token_verifier,
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
pub fn build_router<S: HasServices>(state: S) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/health", get(api::health))
        .route("/ready", get(api::ready::<S>))
        // Brands
        .route(
            "/api/v1/brands",
            get(api::brand::list::<S>).post(api::brand::create::<S>),
        )
        .route(
            "/api/v1/brands/{id}",
            get(api::brand::get::<S>)
                .put(api::brand::update::<S>)
                .delete(api::brand::delete::<S>),
        )
        // Owners
        .route(
            "/api/v1/owners",
            get(api::owner::list::<S>).post(api::owner::create::<S>),
        )
        .route(
            "/api/v1/owners/{id}",
            get(api::owner::get::<S>)
                .put(api::owner::update::<S>)
                .delete(api::owner::delete::<S>),
        )
        .route(
            "/api/v1/owners/{id}/vehicles",
            get(api::owner::list_vehicles::<S>),
        )
        // Vehicles
        .route(
            "/api/v1/vehicles",
            get(api::vehicle::list::<S>).post(api::vehicle::create::<S>),
        )
        .route(
            "/api/v1/vehicles/{id}",
            get(api::vehicle::get::<S>)
                .put(api::vehicle::update::<S>)
                .delete(api::vehicle::delete::<S>),
        )
        // Users
        .route("/api/v1/users/me", get(api::user::me::<S>))
        .route("/api/v1/users/{id}", get(api::user::get::<S>));

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
