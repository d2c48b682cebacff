//! # pricing-dashboard: Consulting Pricing Model Dashboard
//!
//! An internal dashboard over the consulting pricing store. Staff browse projects, consultant
//! levels, staffing and per-currency figures, and manage projects, role assignments and
//! personnel through a handful of forms.
//!
//! ## Architecture
//!
//! The HTTP layer is [Axum](https://github.com/tokio-rs/axum); the store is PostgreSQL, reached
//! through [`db::gateway::Gateway`]. The gateway opens a fresh connection per operation, runs
//! reads directly and writes inside a transaction, and closes the connection on every exit path.
//! Nothing is pooled or cached between requests.
//!
//! ### Request Flow
//!
//! Every dashboard page registers a router with the [`shell::Shell`], which nests it under
//! `/api/v1` and derives the sidebar menu (`GET /api/v1/menu`) from the registrations. A form
//! tab answers `GET` with a [`api::models::forms::FormSpec`] whose select options come from the
//! catalogs, and `POST` with the submission. Submissions name their selections by display value
//! (a currency name, a consultant's full name); the handler resolves those against a
//! [`catalog::Catalog`] fetched for the same request and then writes through a repository in
//! [`db::handlers`].
//!
//! Deleting a project or a consultant that other rows reference follows a
//! [`db::cascade::DeletionPlan`]: without `acknowledge_cascade` the request only reports the
//! dependent row counts, with it the dependents and the parent are deleted in one transaction.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use pricing_dashboard::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = pricing_dashboard::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     pricing_dashboard::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config);
//!     app.serve(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await
//! }
//! ```
//!
//! ## Database Setup
//!
//! Migrations are not applied at startup. Run them once with `pricing-dashboard --migrate`, or:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::migrate::MigrateError> {
//! pricing_dashboard::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.
pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod shell;
pub mod telemetry;
#[cfg(all(test, feature = "db-tests"))]
mod test_utils;
pub mod types;

use crate::{
    api::API_PREFIX,
    config::CorsOrigin,
    db::gateway::Gateway,
    openapi::ApiDoc,
};
use axum::{
    Json, Router,
    http::{self, HeaderValue},
    routing::get,
};
use bon::Builder;
pub use config::Config;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument, warn};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Application state shared across all request handlers.
///
/// # Example
///
/// ```ignore
/// let state = AppState::builder()
///     .gateway(Gateway::new(&config.database))
///     .config(config)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub gateway: Gateway,
    pub config: Config,
}

/// Get the pricing store migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    // A wildcard cannot be part of an origin list
    let allow_origin = if config.cors.allowed_origins.contains(&CorsOrigin::Wildcard) {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &config.cors.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([http::Method::GET, http::Method::POST])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_credentials(config.cors.allow_credentials);

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router: health check, the dashboard API under [`API_PREFIX`], the
/// OpenAPI document and its docs UI, with CORS and request tracing applied to all of them.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors_layer = create_cors_layer(&state.config)?;
    let api_routes = api::handlers::shell(&state.config.metadata.title).into_router();

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .nest(API_PREFIX, api_routes)
        .with_state(state)
        .layer(cors_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

/// The dashboard server.
///
/// Construction never touches the database: missing or wrong credentials surface as a
/// connection failure on the first request that needs the store.
pub struct Application {
    config: Config,
    gateway: Gateway,
}

impl Application {
    pub fn new(config: Config) -> Self {
        debug!("Starting pricing dashboard with configuration: {:#?}", config);

        let gateway = Gateway::new(&config.database);
        if !gateway.is_configured() {
            warn!("Database connection is not configured; pages will report it as unavailable");
        }

        Self { config, gateway }
    }

    pub fn state(&self) -> AppState {
        AppState::builder().gateway(self.gateway.clone()).config(self.config.clone()).build()
    }

    /// Apply pending migrations and return.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        self.gateway.run_migrations(&migrator()).await?;
        info!("Migrations applied");
        Ok(())
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> anyhow::Result<axum_test::TestServer> {
        let router = build_router(self.state())?;
        axum_test::TestServer::new(router)
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state())?;
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "{} listening on http://{}, docs at http://localhost:{}/docs",
            self.config.metadata.title, bind_addr, self.config.port
        );

        axum::serve(listener, router.into_make_service()).with_graceful_shutdown(shutdown).await?;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
