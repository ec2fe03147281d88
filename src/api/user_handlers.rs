//! User Management Handlers

use axum::{extract::State, Extension, Json};
use validator::Validate;

use crate::api::extract::ApiJson;
use crate::api::middleware::AuthUser;
use crate::api::AppState;
use crate::models::requests::CreateUserRequest;
use crate::models::user::UserResponse;
use crate::utils::error::{AppError, AppResult};

/// Create a new user. Requires an authenticated superuser; an authenticated
/// regular user is denied and nothing is written.
pub async fn create_user(
    State(state): State<AppState>,
    Extension(AuthUser(current_user)): Extension<AuthUser>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(format!("Invalid user data: {}", e)))?;

    if !current_user.is_superuser {
        log::warn!(
            "user {} denied: creating users requires superuser rights",
            current_user.email
        );
        return Err(AppError::AccessDenied);
    }

    let user = state.user_service.create_user(&request, false).await?;
    Ok(Json(user.into()))
}
