//! Configuration Module
//!
//! All runtime settings live in one immutable [`AppConfig`] built from the
//! environment at startup and handed to the services that need it. Nothing
//! reads ambient globals after boot.

use thiserror::Error;

use crate::database::DatabaseConfig;
use crate::service::token::DEFAULT_TOKEN_EXPIRE_MINUTES;

/// Environment variable helpers
pub mod env {
    use std::env;

    /// Get environment variable as string with default
    pub fn get_string(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Get environment variable as u16 with default
    pub fn get_u16(key: &str, default: u16) -> u16 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get environment variable as i64 with default
    pub fn get_i64(key: &str, default: i64) -> i64 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Check if environment variable is set
    pub fn is_set(key: &str) -> bool {
        env::var(key).is_ok()
    }
}

/// Configuration errors raised at startup
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Required environment variable {0} is not set")]
    MissingVariable(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration combining all service configurations
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

/// Token service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret_key: String,
    pub token_expire_minutes: i64,
}

impl AppConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret_key = std::env::var("SECRET_KEY")
            .map_err(|_| ConfigError::MissingVariable("SECRET_KEY"))?;

        let database = DatabaseConfig::from_env()
            .map_err(|_| ConfigError::MissingVariable("DATABASE_URL"))?;

        let cors_origins = env::get_string("CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            server: ServerConfig {
                host: env::get_string("SERVER_HOST", "0.0.0.0"),
                port: env::get_u16("SERVER_PORT", 8000),
                cors_origins,
            },
            database,
            auth: AuthConfig {
                secret_key,
                token_expire_minutes: env::get_i64(
                    "ACCESS_TOKEN_EXPIRE_MINUTES",
                    DEFAULT_TOKEN_EXPIRE_MINUTES,
                ),
            },
        })
    }

    /// Sanity-check the loaded configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.secret_key.is_empty() {
            return Err(ConfigError::Invalid("SECRET_KEY must not be empty".into()));
        }
        if self.auth.token_expire_minutes < 1 {
            return Err(ConfigError::Invalid(
                "ACCESS_TOKEN_EXPIRE_MINUTES must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
