//! # Lavagem API
//!
//! The API crate provides the web server for the Lavagem wash-appointment
//! service. It exposes RESTful endpoints for appointments, employees and
//! vehicles on top of the scheduler from `lavagem-core`.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into scheduler and repository calls
//! - **Middleware**: Error mapping shared by every handler
//! - **Config**: Environment configuration
//!
//! Storage is reached only through the repository traits, so the same router
//! runs against Postgres in production and the in-memory store in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use eyre::Result;
use lavagem_core::repository::Repository;
use lavagem_core::scheduler::Scheduler;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Validates and writes appointments
    pub scheduler: Scheduler,
    /// Direct access for the employee and vehicle endpoints
    pub repository: Arc<dyn Repository>,
}

impl ApiState {
    pub fn new(repository: Arc<dyn Repository>, config: &config::ApiConfig) -> Self {
        Self {
            scheduler: Scheduler::new(repository.clone(), config.scheduler),
            repository,
        }
    }
}

/// Builds the router with every endpoint attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Appointment scheduling endpoints
        .merge(routes::appointment::routes())
        // Employee management endpoints
        .merge(routes::employee::routes())
        // Vehicle management endpoints
        .merge(routes::vehicle::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(allowed)
}

/// Starts the API server with the provided configuration and repository
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use lavagem_api::{config::ApiConfig, start_server};
/// use lavagem_db::InMemoryRepository;
///
/// # async fn run() -> eyre::Result<()> {
/// let config = ApiConfig::from_env()?;
/// start_server(config, Arc::new(InMemoryRepository::new())).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(
    config: config::ApiConfig,
    repository: Arc<dyn Repository>,
) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(repository, &config));
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    let hours = config.scheduler.business_hours.window();
    info!(
        business_hours = %hours,
        update_policy = ?config.scheduler.update_policy,
        "scheduler configured"
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
