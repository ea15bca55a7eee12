//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Slotbook API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `BOOKING_HORIZON_DAYS`: How far ahead customers may book (default: 60)
//! - `REFERENCE_WINDOW_START` / `REFERENCE_WINDOW_END`: Window used to size a
//!   full day when classifying availability (default: "09:00" / "17:00")

use eyre::{Result, WrapErr};
use slotbook_core::{
    availability::{DEFAULT_BOOKING_HORIZON_DAYS, ReferenceWindow},
    time_of_day::TimeOfDay,
};
use std::env;
use tracing::Level;

/// Configuration for the Slotbook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Maximum number of pooled database connections
    pub database_max_connections: u32,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Number of days after today that can still be booked
    pub booking_horizon_days: u32,

    /// Window that defines a "full" day for availability classification
    pub reference_window: ReferenceWindow,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - The reference window variables are not valid "HH:MM" times or the
    ///   window is empty
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;
        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .wrap_err("Invalid DATABASE_MAX_CONNECTIONS value")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Booking settings
        let booking_horizon_days = match env::var("BOOKING_HORIZON_DAYS") {
            Ok(days) => days.parse().wrap_err("Invalid BOOKING_HORIZON_DAYS value")?,
            Err(_) => DEFAULT_BOOKING_HORIZON_DAYS,
        };
        let reference_window = reference_window_from(
            env::var("REFERENCE_WINDOW_START").ok().as_deref(),
            env::var("REFERENCE_WINDOW_END").ok().as_deref(),
        )?;

        Ok(Self {
            host,
            port,
            database_url,
            database_max_connections,
            log_level,
            cors_origins,
            request_timeout,
            booking_horizon_days,
            reference_window,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub(crate) fn parse_log_level(level: &str) -> Level {
    match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Builds the classification window, falling back to the default bound for
/// whichever side is unset.
pub(crate) fn reference_window_from(start: Option<&str>, end: Option<&str>) -> Result<ReferenceWindow> {
    let open = match start {
        Some(value) => TimeOfDay::parse(value).wrap_err("Invalid REFERENCE_WINDOW_START value")?,
        None => ReferenceWindow::DEFAULT.open(),
    };
    let close = match end {
        Some(value) => TimeOfDay::parse(value).wrap_err("Invalid REFERENCE_WINDOW_END value")?,
        None => ReferenceWindow::DEFAULT.close(),
    };

    ReferenceWindow::new(open, close).wrap_err("Reference window must start before it ends")
}
