//! HTTP API layer: handlers, middleware, pagination, and routing

use std::sync::Arc;

use crate::service::{FootprintService, TokenService, UserService};

pub mod auth_handlers;
pub mod extract;
pub mod footprint_handlers;
pub mod handlers;
pub mod middleware;
pub mod pagination;
pub mod routes;
pub mod user_handlers;

pub use routes::RouterBuilder;

/// Application state shared across handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub footprint_service: Arc<FootprintService>,
    pub token_service: Arc<TokenService>,
}
