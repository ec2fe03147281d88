//! Token Endpoint Handler
//!
//! OAuth2 client-credentials exchange: a form-encoded `client_id` /
//! `client_secret` pair buys a short-lived bearer token. A malformed form is
//! a catalog BadRequest; failed authentication is the one place the OAuth2
//! `invalid_client` envelope is used. Whether the identifier was unknown or
//! the secret wrong is never distinguished.

use axum::{
    extract::{rejection::FormRejection, State},
    response::{IntoResponse, Response},
    Form, Json,
};

use crate::api::AppState;
use crate::models::auth::Token;
use crate::models::requests::TokenRequestForm;
use crate::utils::error::{AppError, OAuth2Error};

/// Exchange client credentials for a bearer token.
pub async fn issue_token(
    State(state): State<AppState>,
    form: Result<Form<TokenRequestForm>, FormRejection>,
) -> Response {
    let Ok(Form(form)) = form else {
        return AppError::BadRequest.into_response();
    };

    if !form.grant_type_is_acceptable() {
        return AppError::BadRequest.into_response();
    }

    let (Some(client_id), Some(client_secret)) =
        (form.client_id.as_deref(), form.client_secret.as_deref())
    else {
        return AppError::BadRequest.into_response();
    };

    match state.user_service.authenticate(client_id, client_secret).await {
        Ok(Some(user)) => match state.token_service.issue(&user.email) {
            Ok(access_token) => {
                log::info!("issued access token for {}", user.email);
                Json(Token::bearer(access_token)).into_response()
            }
            Err(e) => e.into_response(),
        },
        Ok(None) => {
            log::warn!("authentication failed for client_id {}", client_id);
            OAuth2Error::invalid_client().into_response()
        }
        Err(e) => AppError::from(e).into_response(),
    }
}
