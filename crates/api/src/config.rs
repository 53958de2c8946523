//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Lessonbook API server.
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
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//!
//! Engine constants, all optional with the school's defaults:
//!
//! - `LESSON_MORNING_START` (8), `LESSON_MORNING_MARKUP_END` (10)
//! - `LESSON_EVENING_MARKUP_START` (22), `LESSON_EVENING_END` (23)
//! - `LESSON_COMMON_PRICE` (1000), `LESSON_HIGH_PRICE` (1300)
//! - `LESSON_MIN_LEAD_HOURS` (3), `LESSON_HORIZON_DAYS` (7), `LESSON_THRESHOLD` (5)

use eyre::{Result, WrapErr, eyre};
use lessonbook_core::config::EngineConfig;
use std::{env, str::FromStr};
use tracing::Level;

/// Configuration for the Lessonbook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use lessonbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
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

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Business hours, prices and booking horizon
    pub engine: EngineConfig,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - A numeric value cannot be parsed
    /// - The engine constants are inconsistent
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "API_PORT", 3000)?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;

        // Logging settings
        let log_level = match lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(30);

        let engine = engine_from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            engine,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn engine_from_lookup<F>(lookup: &F) -> Result<EngineConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = EngineConfig::default();

    let engine = EngineConfig {
        morning_start: parse_or(lookup, "LESSON_MORNING_START", defaults.morning_start)?,
        morning_markup_end: parse_or(lookup, "LESSON_MORNING_MARKUP_END", defaults.morning_markup_end)?,
        evening_markup_start: parse_or(
            lookup,
            "LESSON_EVENING_MARKUP_START",
            defaults.evening_markup_start,
        )?,
        evening_end: parse_or(lookup, "LESSON_EVENING_END", defaults.evening_end)?,
        common_price: parse_or(lookup, "LESSON_COMMON_PRICE", defaults.common_price)?,
        high_price: parse_or(lookup, "LESSON_HIGH_PRICE", defaults.high_price)?,
        min_lead_hours: parse_or(lookup, "LESSON_MIN_LEAD_HOURS", defaults.min_lead_hours)?,
        horizon_days: parse_or(lookup, "LESSON_HORIZON_DAYS", defaults.horizon_days)?,
        lesson_threshold: parse_or(lookup, "LESSON_THRESHOLD", defaults.lesson_threshold)?,
    };

    engine
        .validate()
        .wrap_err("Invalid lesson engine configuration")?;

    Ok(engine)
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid {} value", key)),
        None => Ok(default),
    }
}
