//! # API Configuration Module
//!
//! Loads the server configuration from environment variables, with defaults
//! where a sensible one exists.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `BUSINESS_HOURS_START` / `BUSINESS_HOURS_END`: The daily booking window
//!   (default: 08:00 - 18:00)
//! - `UPDATE_RECHECK_OVERLAP`: Whether updates repeat the overlap check
//!   (default: true)

use std::env;

use eyre::{Result, WrapErr, eyre};
use lavagem_core::hours::BusinessHours;
use lavagem_core::scheduler::{SchedulerConfig, UpdatePolicy};
use lavagem_core::time::parse_time;
use tracing::Level;

/// Configuration for the Lavagem API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use lavagem_api::config::ApiConfig;
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

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Booking window and update policy handed to the scheduler
    pub scheduler: SchedulerConfig,
}

impl ApiConfig {
    /// Creates a new ApiConfig from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when `DATABASE_URL` is not set, or when `API_PORT`, the
    /// business hours or `UPDATE_RECHECK_OVERLAP` cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;

        // Logging settings
        let log_level = match lookup("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
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

        // Scheduling settings
        let defaults = BusinessHours::default().window();
        let open = match lookup("BUSINESS_HOURS_START") {
            Some(value) => parse_time(&value).wrap_err("Invalid BUSINESS_HOURS_START value")?,
            None => defaults.start(),
        };
        let close = match lookup("BUSINESS_HOURS_END") {
            Some(value) => parse_time(&value).wrap_err("Invalid BUSINESS_HOURS_END value")?,
            None => defaults.end(),
        };
        let business_hours = BusinessHours::new(open, close)?;

        let update_policy = match lookup("UPDATE_RECHECK_OVERLAP").as_deref().map(str::trim) {
            None | Some("true" | "1" | "yes") => UpdatePolicy::RecheckOverlap,
            Some("false" | "0" | "no") => UpdatePolicy::SkipOverlap,
            Some(other) => return Err(eyre!("Invalid UPDATE_RECHECK_OVERLAP value: {other}")),
        };

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            scheduler: SchedulerConfig {
                business_hours,
                update_policy,
            },
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
