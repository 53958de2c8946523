//! # Lessonbook API
//!
//! The API crate provides the web server for the Lessonbook lesson-booking
//! service. It exposes the calendar, availability, pricing, booking and
//! blocking operations of `lessonbook-core` as JSON endpoints.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Run a request against storage and the booking engine
//! - **Middleware**: Map domain errors to HTTP responses
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error-to-response mapping
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use eyre::Result;
use lessonbook_core::config::EngineConfig;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use lessonbook_api::ApiState;
/// use lessonbook_core::config::EngineConfig;
/// use sqlx::PgPool;
///
/// # fn example(db_pool: PgPool) {
/// let state = Arc::new(ApiState { db_pool, engine: EngineConfig::default() });
/// let app = lessonbook_api::app(state);
/// # }
/// ```
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Constants handed to every validator and pricing call
    pub engine: EngineConfig,
}

/// All API routes with the shared state attached, without transport layers
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Calendar window and merged availability
        .merge(routes::calendar::routes())
        // Tariff and price previews
        .merge(routes::pricing::routes())
        // Student and admin bookings
        .merge(routes::lessons::routes())
        // Blocked ranges
        .merge(routes::blocks::routes())
        // Student records and price overrides
        .merge(routes::students::routes())
        .with_state(state)
}

/// The application router wrapped in tracing, timeout and CORS layers
pub fn build_router(config: &config::ApiConfig, state: Arc<ApiState>) -> Router {
    let app = app(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Apply CORS configuration if origins are specified
    match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
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
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true)
}

/// Starts the API server with the provided configuration and database connection
///
/// Initializes logging, builds the router and serves it until the process
/// is stopped.
///
/// # Example
///
/// ```no_run
/// use lessonbook_api::{config::ApiConfig, start_server};
///
/// # async fn example() -> eyre::Result<()> {
/// let config = ApiConfig::from_env()?;
/// let db_pool = lessonbook_db::create_pool(&config.database_url).await?;
/// start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(
        "Business hours {:02}:00-{:02}:00, booking horizon {} days",
        config.engine.morning_start, config.engine.evening_end, config.engine.horizon_days
    );

    let state = Arc::new(ApiState {
        db_pool,
        engine: config.engine.clone(),
    });
    let app = build_router(&config, state);

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
