//! API Route Definitions
//!
//! Routes are composed through a builder so deployments can expose only the
//! endpoint families they need. The builder also wires the cross-cutting
//! layers: per-family bearer authentication, the pagination Link layer on
//! the footprint family, and plaintext-transport rejection on everything
//! that is neither the token endpoint nor the discovery document.

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};

use super::auth_handlers::issue_token;
use super::footprint_handlers::{
    create_product_footprint, list_product_footprints, read_product_footprint,
};
use super::handlers::{health_check, openid_configuration, post_events};
use super::middleware::{bearer_auth, bearer_auth_or_bad_request, reject_plaintext};
use super::pagination::pagination_link_layer;
use super::user_handlers::create_user;
use super::AppState;

/// Builder for creating API routes with configurable endpoint families.
#[derive(Default)]
pub struct RouterBuilder {
    /// Whether to enable the health check endpoint (GET /health)
    health_check: bool,
    /// Whether to enable the OpenID discovery document
    openid_discovery: bool,
    /// Whether to enable the token endpoint (POST /auth/token)
    auth_token: bool,
    /// Whether to enable user management (POST /users/)
    users: bool,
    /// Whether to enable the footprint endpoints under /2/footprints
    footprints: bool,
    /// Whether to enable the events stub (POST /2/events)
    events: bool,
}

impl RouterBuilder {
    /// Creates a new router builder with all routes disabled by default
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a router builder with every endpoint family enabled
    pub fn with_all_routes() -> Self {
        Self {
            health_check: true,
            openid_discovery: true,
            auth_token: true,
            users: true,
            footprints: true,
            events: true,
        }
    }

    /// Creates a router with only the health check, e.g. for monitoring
    pub fn with_minimal_routes() -> Self {
        Self {
            health_check: true,
            ..Self::default()
        }
    }

    pub fn health_check(mut self, enabled: bool) -> Self {
        self.health_check = enabled;
        self
    }

    pub fn openid_discovery(mut self, enabled: bool) -> Self {
        self.openid_discovery = enabled;
        self
    }

    pub fn auth_token(mut self, enabled: bool) -> Self {
        self.auth_token = enabled;
        self
    }

    pub fn users(mut self, enabled: bool) -> Self {
        self.users = enabled;
        self
    }

    pub fn footprints(mut self, enabled: bool) -> Self {
        self.footprints = enabled;
        self
    }

    pub fn events(mut self, enabled: bool) -> Self {
        self.events = enabled;
        self
    }

    /// Builds the router with all configured routes and middleware.
    pub fn build(self, state: AppState) -> Router {
        let mut router = Router::new();

        if self.health_check {
            router = router.route("/health", get(health_check));
        }

        if self.openid_discovery {
            router = router.route(
                "/.well-known/openid-configuration",
                get(openid_configuration),
            );
        }

        if self.auth_token {
            router = router.route("/auth/token", post(issue_token));
        }

        if self.users {
            let users = Router::new()
                .route("/users/", post(create_user))
                .route_layer(from_fn_with_state(
                    state.clone(),
                    bearer_auth_or_bad_request,
                ))
                .route_layer(from_fn(reject_plaintext));
            router = router.merge(users);
        }

        if self.footprints {
            let footprints = Router::new()
                .route("/2/footprints/", get(list_product_footprints))
                .route(
                    "/2/footprints/create-product-footprint/",
                    post(create_product_footprint),
                )
                .route("/2/footprints/{id}/", get(read_product_footprint))
                .route_layer(from_fn_with_state(state.clone(), bearer_auth))
                .route_layer(from_fn_with_state(state.clone(), pagination_link_layer))
                .route_layer(from_fn(reject_plaintext));
            router = router.merge(footprints);
        }

        if self.events {
            let events = Router::new()
                .route("/2/events", post(post_events))
                .route_layer(from_fn_with_state(state.clone(), bearer_auth))
                .route_layer(from_fn(reject_plaintext));
            router = router.merge(events);
        }

        router.with_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::footprint::sample_footprint;
    use crate::models::requests::CreateUserRequest;
    use crate::service::{FootprintService, TokenService, UserService};
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use sqlx::PgPool;
    use std::sync::Arc;
    use tower::util::ServiceExt;
    use uuid::Uuid;

    const TEST_SECRET: &str = "test_secret_key";
    const TEST_BCRYPT_COST: u32 = 4;

    fn test_state(pool: PgPool) -> AppState {
        AppState {
            user_service: Arc::new(UserService::with_bcrypt_cost(pool.clone(), TEST_BCRYPT_COST)),
            footprint_service: Arc::new(FootprintService::new(pool)),
            token_service: Arc::new(TokenService::new(TEST_SECRET.to_string())),
        }
    }

    fn test_app(state: &AppState) -> Router {
        RouterBuilder::with_all_routes().build(state.clone())
    }

    async fn seed_user(state: &AppState, username: &str, email: &str, superuser: bool) {
        state
            .user_service
            .create_user(
                &CreateUserRequest {
                    username: username.to_string(),
                    email: email.to_string(),
                    password: "secret".to_string(),
                },
                superuser,
            )
            .await
            .unwrap();
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn token_request(client_id: &str, client_secret: &str) -> Request<Body> {
        let form = serde_urlencoded::to_string([
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ])
        .unwrap();

        Request::builder()
            .method(Method::POST)
            .uri("/auth/token")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .unwrap()
    }

    async fn obtain_token(app: &Router, client_id: &str, client_secret: &str) -> String {
        let response = app
            .clone()
            .oneshot(token_request(client_id, client_secret))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["token_type"], "bearer");
        json["access_token"].as_str().unwrap().to_string()
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json_request(
        uri: &str,
        token: Option<&str>,
        body: &serde_json::Value,
    ) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    async fn create_footprints(app: &Router, token: &str, count: usize) -> Vec<Uuid> {
        let mut ids = Vec::new();
        for _ in 0..count {
            let id = Uuid::new_v4();
            let body = serde_json::to_value(sample_footprint(id)).unwrap();
            let response = app
                .clone()
                .oneshot(post_json_request(
                    "/2/footprints/create-product-footprint/",
                    Some(token),
                    &body,
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            ids.push(id);
        }
        ids
    }

    #[test]
    fn test_router_builder_defaults_disabled() {
        let builder = RouterBuilder::new();
        assert!(!builder.health_check);
        assert!(!builder.openid_discovery);
        assert!(!builder.auth_token);
        assert!(!builder.users);
        assert!(!builder.footprints);
        assert!(!builder.events);
    }

    #[test]
    fn test_router_builder_with_all_routes() {
        let builder = RouterBuilder::with_all_routes();
        assert!(builder.health_check);
        assert!(builder.openid_discovery);
        assert!(builder.auth_token);
        assert!(builder.users);
        assert!(builder.footprints);
        assert!(builder.events);
    }

    #[test]
    fn test_router_builder_individual_toggles() {
        let builder = RouterBuilder::new()
            .health_check(true)
            .auth_token(true)
            .footprints(true);
        assert!(builder.health_check);
        assert!(!builder.openid_discovery);
        assert!(builder.auth_token);
        assert!(!builder.users);
        assert!(builder.footprints);
        assert!(!builder.events);
    }

    #[sqlx::test]
    async fn test_end_to_end_footprint_exchange(pool: PgPool) {
        let state = test_state(pool);
        seed_user(&state, "alice", "alice@example.com", true).await;
        let app = test_app(&state);

        let token = obtain_token(&app, "alice@example.com", "secret").await;

        let id = Uuid::new_v4();
        let body = serde_json::to_value(sample_footprint(id)).unwrap();
        let response = app
            .clone()
            .oneshot(post_json_request(
                "/2/footprints/create-product-footprint/",
                Some(&token),
                &body,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!("Success"));

        let uri = format!("/2/footprints/{}/", id);
        let response = app
            .clone()
            .oneshot(get_request(&uri, Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let first = body_bytes(response).await;

        let json: serde_json::Value = serde_json::from_slice(&first).unwrap();
        assert_eq!(json["data"]["companyName"], "Clean Product Company");
        assert_eq!(json["data"]["id"], id.to_string());

        // Reads are idempotent: a second fetch is byte-identical.
        let response = app
            .clone()
            .oneshot(get_request(&uri, Some(&token)))
            .await
            .unwrap();
        let second = body_bytes(response).await;
        assert_eq!(first, second);
    }

    #[sqlx::test]
    async fn test_token_endpoint_rejects_unknown_client(pool: PgPool) {
        let state = test_state(pool);
        let app = test_app(&state);

        let response = app
            .oneshot(token_request("nobody@example.com", "secret"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "invalid_client");
    }

    #[sqlx::test]
    async fn test_token_endpoint_rejects_wrong_secret(pool: PgPool) {
        let state = test_state(pool);
        seed_user(&state, "alice", "alice@example.com", false).await;
        let app = test_app(&state);

        let response = app
            .oneshot(token_request("alice@example.com", "wrong"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "invalid_client");
    }

    #[sqlx::test]
    async fn test_token_endpoint_missing_credentials_is_bad_request(pool: PgPool) {
        let state = test_state(pool);
        let app = test_app(&state);

        let form = "grant_type=client_credentials";
        let request = Request::builder()
            .method(Method::POST)
            .uri("/auth/token")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(
            json,
            serde_json::json!({"message": "Bad Request", "code": "BadRequest"})
        );
    }

    #[sqlx::test]
    async fn test_token_endpoint_rejects_foreign_grant_type(pool: PgPool) {
        let state = test_state(pool);
        seed_user(&state, "alice", "alice@example.com", false).await;
        let app = test_app(&state);

        let form = serde_urlencoded::to_string([
            ("grant_type", "authorization_code"),
            ("client_id", "alice@example.com"),
            ("client_secret", "secret"),
        ])
        .unwrap();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/auth/token")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "BadRequest");
    }

    #[sqlx::test]
    async fn test_expired_token_on_list(pool: PgPool) {
        let state = test_state(pool);
        seed_user(&state, "alice", "alice@example.com", false).await;
        let app = test_app(&state);

        // Well-signed but already past expiry.
        let expired_issuer = TokenService::with_lifetime(
            TEST_SECRET.to_string(),
            chrono::Duration::seconds(-2),
        );
        let token = expired_issuer.issue("alice@example.com").unwrap();

        let response = app
            .oneshot(get_request("/2/footprints/", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "message": "The specified access token has expired",
                "code": "TokenExpired"
            })
        );
    }

    #[sqlx::test]
    async fn test_invalid_token_on_list(pool: PgPool) {
        let state = test_state(pool);
        let app = test_app(&state);

        let response = app
            .oneshot(get_request("/2/footprints/", Some("invalid-token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["code"], "AccessDenied");
    }

    #[sqlx::test]
    async fn test_missing_token_policy_differs_per_family(pool: PgPool) {
        let state = test_state(pool);
        let app = test_app(&state);

        // Resource family: 403.
        let response = app
            .clone()
            .oneshot(get_request("/2/footprints/", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // User family: 400.
        let body = serde_json::json!({
            "username": "bob",
            "email": "bob@example.com",
            "password": "secret"
        });
        let response = app
            .oneshot(post_json_request("/users/", None, &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "BadRequest");
    }

    #[sqlx::test]
    async fn test_create_user_requires_superuser(pool: PgPool) {
        let state = test_state(pool);
        seed_user(&state, "alice", "alice@example.com", true).await;
        let app = test_app(&state);

        // The superuser may create a regular user.
        let token = obtain_token(&app, "alice@example.com", "secret").await;
        let body = serde_json::json!({
            "username": "bob",
            "email": "bob@example.com",
            "password": "secret"
        });
        let response = app
            .clone()
            .oneshot(post_json_request("/users/", Some(&token), &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["username"], "bob");
        assert_eq!(json["email"], "bob@example.com");
        assert_eq!(json["is_active"], true);

        // The regular user may not, and no row is written.
        let users_before = state.user_service.count().await.unwrap();
        let bob_token = obtain_token(&app, "bob@example.com", "secret").await;
        let body = serde_json::json!({
            "username": "carol",
            "email": "carol@example.com",
            "password": "secret"
        });
        let response = app
            .clone()
            .oneshot(post_json_request("/users/", Some(&bob_token), &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["code"], "AccessDenied");
        assert_eq!(state.user_service.count().await.unwrap(), users_before);
    }

    #[sqlx::test]
    async fn test_duplicate_user_is_conflict(pool: PgPool) {
        let state = test_state(pool);
        seed_user(&state, "alice", "alice@example.com", true).await;
        let app = test_app(&state);
        let token = obtain_token(&app, "alice@example.com", "secret").await;

        let body = serde_json::json!({
            "username": "bob",
            "email": "bob@example.com",
            "password": "secret"
        });
        let response = app
            .clone()
            .oneshot(post_json_request("/users/", Some(&token), &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Same email, different username.
        let body = serde_json::json!({
            "username": "robert",
            "email": "bob@example.com",
            "password": "secret"
        });
        let response = app
            .clone()
            .oneshot(post_json_request("/users/", Some(&token), &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "message": "A user with this email already exists",
                "code": "DuplicateEntry"
            })
        );

        // Same username, different email.
        let body = serde_json::json!({
            "username": "bob",
            "email": "bob2@example.com",
            "password": "secret"
        });
        let response = app
            .oneshot(post_json_request("/users/", Some(&token), &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_json(response).await["message"],
            "A user with this username already exists"
        );
    }

    #[sqlx::test]
    async fn test_list_pagination_and_link_header(pool: PgPool) {
        let state = test_state(pool);
        seed_user(&state, "alice", "alice@example.com", true).await;
        let app = test_app(&state);
        let token = obtain_token(&app, "alice@example.com", "secret").await;

        create_footprints(&app, &token, 4).await;

        // First page: another page exists, so the Link header is present.
        let response = app
            .clone()
            .oneshot(get_request("/2/footprints/?limit=2", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let link = response
            .headers()
            .get(header::LINK)
            .expect("Link header missing")
            .to_str()
            .unwrap()
            .to_string();
        assert!(link.starts_with("<https://"));
        assert!(link.contains("offset=3"));
        assert!(link.contains("limit=2"));
        assert!(link.ends_with("; rel=\"next\""));

        let json = body_json(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["meta"]["total"], 4);

        // Second page: offset + limit = 5 is not < 4, no Link header.
        let response = app
            .clone()
            .oneshot(get_request("/2/footprints/?offset=3&limit=2", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::LINK).is_none());
        let json = body_json(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 2);

        // Without an explicit limit pagination is inactive: no Link header.
        let response = app
            .clone()
            .oneshot(get_request("/2/footprints/", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::LINK).is_none());

        // An offset past the end is an empty page, not an error.
        let response = app
            .clone()
            .oneshot(get_request("/2/footprints/?offset=99&limit=2", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 0);
    }

    #[sqlx::test]
    async fn test_link_header_absent_on_exact_boundary(pool: PgPool) {
        let state = test_state(pool);
        seed_user(&state, "alice", "alice@example.com", true).await;
        let app = test_app(&state);
        let token = obtain_token(&app, "alice@example.com", "secret").await;

        create_footprints(&app, &token, 3).await;

        // offset + limit = 3 equals the total: no further page.
        let response = app
            .oneshot(get_request("/2/footprints/?limit=3", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::LINK).is_none());
    }

    #[sqlx::test]
    async fn test_list_rejects_out_of_range_pagination(pool: PgPool) {
        let state = test_state(pool);
        seed_user(&state, "alice", "alice@example.com", false).await;
        let app = test_app(&state);
        let token = obtain_token(&app, "alice@example.com", "secret").await;

        for uri in [
            "/2/footprints/?limit=0",
            "/2/footprints/?limit=101",
            "/2/footprints/?offset=0",
            "/2/footprints/?offset=-1&limit=10",
        ] {
            let response = app
                .clone()
                .oneshot(get_request(uri, Some(&token)))
                .await
                .unwrap();
            assert_eq!(
                response.status(),
                StatusCode::UNPROCESSABLE_ENTITY,
                "expected 422 for {}",
                uri
            );
        }
    }

    #[sqlx::test]
    async fn test_list_empty_store_is_ok(pool: PgPool) {
        let state = test_state(pool);
        seed_user(&state, "alice", "alice@example.com", false).await;
        let app = test_app(&state);
        let token = obtain_token(&app, "alice@example.com", "secret").await;

        let response = app
            .oneshot(get_request("/2/footprints/", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"], serde_json::json!([]));
        assert_eq!(json["meta"]["total"], 0);
    }

    #[sqlx::test]
    async fn test_unknown_footprint_is_404(pool: PgPool) {
        let state = test_state(pool);
        seed_user(&state, "alice", "alice@example.com", false).await;
        let app = test_app(&state);
        let token = obtain_token(&app, "alice@example.com", "secret").await;

        for uri in [
            format!("/2/footprints/{}/", Uuid::new_v4()),
            "/2/footprints/non-existent-pf-id/".to_string(),
        ] {
            let response = app
                .clone()
                .oneshot(get_request(&uri, Some(&token)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert_eq!(
                body_json(response).await,
                serde_json::json!({
                    "message": "The specified footprint does not exist",
                    "code": "NoSuchFootprint"
                })
            );
        }
    }

    #[sqlx::test]
    async fn test_invalid_footprint_body_rejected(pool: PgPool) {
        let state = test_state(pool);
        seed_user(&state, "alice", "alice@example.com", false).await;
        let app = test_app(&state);
        let token = obtain_token(&app, "alice@example.com", "secret").await;

        // An "Other" rule without its operator name violates the
        // conditional-field invariant.
        let mut body = serde_json::to_value(sample_footprint(Uuid::new_v4())).unwrap();
        body["pcf"]["productOrSectorSpecificRules"] = serde_json::json!([
            {"operator": "Other", "ruleNames": ["some rule"]}
        ]);

        let response = app
            .clone()
            .oneshot(post_json_request(
                "/2/footprints/create-product-footprint/",
                Some(&token),
                &body,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["code"], "ValidationError");
        assert_eq!(state.footprint_service.count().await.unwrap(), 0);
    }

    #[sqlx::test]
    async fn test_events_stub(pool: PgPool) {
        let state = test_state(pool);
        seed_user(&state, "alice", "alice@example.com", false).await;
        let app = test_app(&state);
        let token = obtain_token(&app, "alice@example.com", "secret").await;

        let request = Request::builder()
            .method(Method::POST)
            .uri("/2/events")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "message": "The specified Action or header you provided implies functionality that is not implemented",
                "code": "NotImplemented"
            })
        );

        // Unauthenticated callers never reach the stub.
        let request = Request::builder()
            .method(Method::POST)
            .uri("/2/events")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[sqlx::test]
    async fn test_openid_discovery(pool: PgPool) {
        let state = test_state(pool);
        let app = test_app(&state);

        let response = app
            .oneshot(get_request("/.well-known/openid-configuration", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["token_endpoint"], "https://id.example.org/auth/token");
        assert_eq!(json["subject_types_supported"], serde_json::json!(["public"]));
    }

    #[sqlx::test]
    async fn test_forwarded_plaintext_rejected_on_resources(pool: PgPool) {
        let state = test_state(pool);
        let app = test_app(&state);

        let request = Request::builder()
            .method(Method::GET)
            .uri("/2/footprints/")
            .header("x-forwarded-proto", "http")
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // The discovery document stays reachable over any transport.
        let request = Request::builder()
            .method(Method::GET)
            .uri("/.well-known/openid-configuration")
            .header("x-forwarded-proto", "http")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
