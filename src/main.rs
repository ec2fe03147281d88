//! Pathfinder Host Server
//!
//! Development server exposing every endpoint family of the product
//! footprint data exchange host: token issuance, user management,
//! footprints, the events stub, and the OpenID discovery document.

use std::sync::Arc;

use axum::http::HeaderValue;
use dotenv::dotenv;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use pathfinder_host::{
    api::{AppState, RouterBuilder},
    config::AppConfig,
    service::{FootprintService, TokenService, UserService},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv().ok();

    env_logger::init();

    log::info!("Starting Pathfinder Host v{}", pathfinder_host::VERSION);

    let config = AppConfig::from_env()?;
    config.validate()?;
    log::info!("Configuration loaded and validated");

    let pool = config.database.create_pool().await?;

    log::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("Database migrations completed");

    let state = AppState {
        user_service: Arc::new(UserService::new(pool.clone())),
        footprint_service: Arc::new(FootprintService::new(pool)),
        token_service: Arc::new(TokenService::with_lifetime(
            config.auth.secret_key.clone(),
            chrono::Duration::minutes(config.auth.token_expire_minutes),
        )),
    };
    log::info!(
        "Services initialized (token lifetime: {} min)",
        config.auth.token_expire_minutes
    );

    let cors_origins: Vec<HeaderValue> = config
        .server
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let app = RouterBuilder::with_all_routes().build(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(cors_origins)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .into_inner(),
    );

    log::info!("Endpoints:");
    log::info!("  POST /auth/token - exchange client credentials for a bearer token");
    log::info!("  POST /users/ - create user (superuser only)");
    log::info!("  POST /2/footprints/create-product-footprint/ - store a footprint");
    log::info!("  GET  /2/footprints/{{id}}/ - fetch a footprint");
    log::info!("  GET  /2/footprints/ - list footprints (offset/limit)");
    log::info!("  POST /2/events - events stub (NotImplemented)");
    log::info!("  GET  /.well-known/openid-configuration - discovery document");
    log::info!("  GET  /health - liveness probe");

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    log::info!("Listening on {}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
