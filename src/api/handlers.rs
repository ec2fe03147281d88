//! General HTTP Handlers
//!
//! Liveness probe, the static OpenID discovery document, and the events
//! stub. Events are part of the optional protocol surface this host does
//! not offer, so the endpoint fails predictably with the catalog's
//! NotImplemented entry instead of a bare 404 or 500.

use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::middleware::AuthUser;
use crate::api::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::VERSION;

/// Body of the health check response.
#[derive(Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> AppResult<Json<HealthCheckResponse>> {
    state.user_service.health_check().await?;

    Ok(Json(HealthCheckResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: VERSION.to_string(),
    }))
}

/// Static OpenID provider configuration document.
pub async fn openid_configuration() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "issuer": "https://id.example.org",
        "authorization_endpoint": "https://id.example.org/auth/authorize",
        "token_endpoint": "https://id.example.org/auth/token",
        "userinfo_endpoint": "https://id.example.org/auth/userinfo",
        "jwks_uri": "https://id.example.org/.well-known/jwks.json",
        "response_types_supported": ["code", "token", "id_token"],
        "subject_types_supported": ["public"],
        "id_token_signing_alg_values_supported": ["RS256"]
    }))
}

/// Events endpoint stub: authenticated callers get the catalog's
/// NotImplemented response.
pub async fn post_events(Extension(_user): Extension<AuthUser>) -> AppError {
    AppError::NotImplemented
}
