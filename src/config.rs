//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::sync::LazyLock;
use std::time::Duration;

use crate::constants::{
    DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, DEFAULT_DATABASE_MAX_CONNECTIONS,
    DEFAULT_KEEP_ALIVE_INTERVAL_SECS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_SESSION_COOKIE_NAME, DEFAULT_SESSION_EXPIRY_HOURS,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub session: SessionConfig,
    pub keep_alive: KeepAliveConfig,
    pub seed: SeedConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

/// Session token and cookie configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub expiry_hours: i64,
    pub cookie_name: String,
    /// Adds the `Secure` attribute to the session cookie
    pub cookie_secure: bool,
}

/// Background keep-alive ping configuration
#[derive(Debug, Clone)]
pub struct KeepAliveConfig {
    pub interval: Duration,
}

/// Initial administrator account, created when no admin exists
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub admin_email: String,
    pub admin_password: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            session: SessionConfig::from_env()?,
            keep_alive: KeepAliveConfig::from_env()?,
            seed: SeedConfig::from_env(),
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: LogFormat::parse(
                &env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            )
            .ok_or_else(|| ConfigError::InvalidValue("LOG_FORMAT".to_string()))?,
        })
    }
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
        })
    }
}

impl RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        })
    }
}

impl SessionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let expiry_hours: i64 = env::var("SESSION_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_SESSION_EXPIRY_HOURS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("SESSION_EXPIRY_HOURS".to_string()))?;

        if expiry_hours <= 0 {
            return Err(ConfigError::InvalidValue("SESSION_EXPIRY_HOURS".to_string()));
        }

        Ok(Self {
            secret: env::var("SESSION_SECRET")
                .map_err(|_| ConfigError::Missing("SESSION_SECRET".to_string()))?,
            expiry_hours,
            cookie_name: env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| DEFAULT_SESSION_COOKIE_NAME.to_string()),
            cookie_secure: env::var("SESSION_COOKIE_SECURE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SESSION_COOKIE_SECURE".to_string()))?,
        })
    }

    /// Session lifetime in seconds
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_hours * 60 * 60
    }
}

impl KeepAliveConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secs: u64 = env::var("KEEP_ALIVE_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_KEEP_ALIVE_INTERVAL_SECS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("KEEP_ALIVE_INTERVAL_SECS".to_string()))?;

        if secs == 0 {
            return Err(ConfigError::InvalidValue("KEEP_ALIVE_INTERVAL_SECS".to_string()));
        }

        Ok(Self {
            interval: Duration::from_secs(secs),
        })
    }
}

impl SeedConfig {
    fn from_env() -> Self {
        Self {
            admin_email: env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string()),
            admin_password: env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string()),
        }
    }

    /// Whether the seeded admin would use the built-in password
    pub fn uses_default_password(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
