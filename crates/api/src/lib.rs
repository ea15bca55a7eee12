//! # Slotbook API
//!
//! The API crate provides the web server for the Slotbook public booking
//! service. Customers browse a provider's services, see which days and start
//! times are open, and book an appointment.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Load records through the store and call the availability
//!   engine and form validation in `slotbook-core`
//! - **Middleware**: Error-to-HTTP mapping
//! - **Config**: Environment configuration
//!
//! Handlers reach storage only through `slotbook_db::BookingStore`, so the
//! router can be built over the Postgres store or a mock.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling shared by all handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{Router, http::HeaderValue};
use eyre::{Result, WrapErr};
use slotbook_core::availability::{DEFAULT_BOOKING_HORIZON_DAYS, DayClassifier};
use slotbook_db::BookingStore;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(ApiState::new(Arc::new(PgStore::new(pool))));
/// let app = build_router(state);
/// ```
pub struct ApiState {
    /// Storage for providers, services, hours, fields and appointments
    pub store: Arc<dyn BookingStore>,
    /// Classifier used for calendar days, carrying the reference window
    pub classifier: DayClassifier,
    /// Number of days after today that can still be booked
    pub booking_horizon_days: u32,
}

impl ApiState {
    /// State with the default reference window and booking horizon.
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self {
            store,
            classifier: DayClassifier::default(),
            booking_horizon_days: DEFAULT_BOOKING_HORIZON_DAYS,
        }
    }

    pub fn from_config(store: Arc<dyn BookingStore>, config: &config::ApiConfig) -> Self {
        Self {
            store,
            classifier: DayClassifier::new(config.reference_window),
            booking_horizon_days: config.booking_horizon_days,
        }
    }
}

/// Builds the application router with all routes and shared state attached.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Public provider profile
        .merge(routes::provider::routes())
        // Slots and calendar
        .merge(routes::availability::routes())
        // Booking form and submission
        .merge(routes::booking::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and store
///
/// Installs the tracing subscriber, builds the router, applies CORS, request
/// tracing and the request timeout, then serves until the process exits.
///
/// # Example
///
/// ```ignore
/// let config = config::ApiConfig::from_env()?;
/// let pool = slotbook_db::create_pool(&config.database_url, config.database_max_connections).await?;
/// start_server(config, Arc::new(PgStore::new(pool))).await?;
/// ```
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn BookingStore>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::from_config(store, &config));
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {origin}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
        .allow_origin(origins))
}
