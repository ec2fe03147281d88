//! Pathfinder Host Library
//!
//! A reference host for the product footprint data exchange protocol: data
//! recipients authenticate through an OAuth2 client-credentials flow, then
//! create, fetch, and page through product footprints with their nested
//! carbon footprints.
//!
//! # Features
//!
//! - **Conformance-shaped errors**: every failure resolves to one entry of a
//!   fixed `{message, code}` catalog with exact status codes
//! - **Stateless bearer tokens**: short-lived HS256 JWTs whose expired and
//!   malformed outcomes map to different HTTP responses
//! - **Offset/limit pagination**: 1-based offsets with a protocol-shaped
//!   `Link; rel="next"` response header
//! - **PostgreSQL persistence**: SQLx connection pooling and transactional
//!   aggregate writes
//! - **Configurable routing**: endpoint families toggled per deployment via
//!   a RouterBuilder
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use pathfinder_host::{
//!     api::{AppState, RouterBuilder},
//!     config::AppConfig,
//!     service::{FootprintService, TokenService, UserService},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let pool = config.database.create_pool().await?;
//!
//!     let state = AppState {
//!         user_service: Arc::new(UserService::new(pool.clone())),
//!         footprint_service: Arc::new(FootprintService::new(pool)),
//!         token_service: Arc::new(TokenService::new(config.auth.secret_key.clone())),
//!     };
//!
//!     let app = RouterBuilder::with_all_routes().build(state);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

/// HTTP API layer with handlers, middleware, and configurable routing
pub mod api;

/// Configuration management
pub mod config;

/// Database connection management
pub mod database;

/// Data models and request/response structures
pub mod models;

/// Business logic: tokens, users, footprints
pub mod service;

/// Shared utilities for errors, hashing, and validation
pub mod utils;

// Re-export commonly used types for convenient access
pub use api::{AppState, RouterBuilder};
pub use config::AppConfig;
pub use database::{DatabaseConfig, DatabasePool};
pub use models::{
    auth::Token,
    carbon::CarbonFootprint,
    footprint::{ProductFootprint, ProductFootprintStatus},
    requests::CreateUserRequest,
    user::{User, UserResponse},
};
pub use service::{FootprintService, TokenService, UserService};
pub use utils::error::{AppError, AppResult, ErrorBody};

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
