//! Request Models
//!
//! Bodies accepted by the write endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::email_validator;

/// Body of `POST /users/`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255))]
    pub username: String,

    #[validate(custom(function = "email_validator"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Form body of `POST /auth/token` (OAuth2 client-credentials grant).
///
/// Every field is optional at the extraction layer; the handler decides
/// which absences are a BadRequest versus an invalid_client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenRequestForm {
    pub grant_type: Option<String>,
    pub scope: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl TokenRequestForm {
    /// The grant type is acceptable when absent, empty, or the literal
    /// `client_credentials`.
    pub fn grant_type_is_acceptable(&self) -> bool {
        match self.grant_type.as_deref() {
            None | Some("") | Some("client_credentials") => true,
            Some(_) => false,
        }
    }
}
