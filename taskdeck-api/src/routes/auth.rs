/// Login endpoint
///
/// Exchanges form credentials for a signed bearer token.
///
/// # Endpoints
///
/// - `POST /token` - Login with form fields `username` (the email) and
///   `password`

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Form, Json};
use serde::{Deserialize, Serialize};
use taskdeck_shared::{
    auth::{jwt, password},
    models::user::User,
};

/// Login form body
///
/// The field is named `username` to match the common password-grant form
/// convention; its value is the account email.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Account email
    pub username: String,

    /// Plaintext password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed bearer token
    pub access_token: String,

    /// Token type, always "bearer"
    pub token_type: String,
}

/// Login endpoint
///
/// Looks up the user by email and verifies the password. Unknown email and
/// wrong password produce the identical failure, so a caller cannot probe
/// which addresses are registered.
///
/// # Endpoint
///
/// ```text
/// POST /token
/// Content-Type: application/x-www-form-urlencoded
///
/// username=user%40example.com&password=secret123
/// ```
///
/// # Response
///
/// ```json
/// {
///   "access_token": "eyJ...",
///   "token_type": "bearer"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Incorrect email or password
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Json<TokenResponse>> {
    let user = User::find_by_email(&state.db, &form.username).await?;

    let user = match user {
        Some(user) if password::verify_password(&form.password, &user.hashed_password) => user,
        _ => {
            return Err(ApiError::Unauthorized(
                "Incorrect email or password".to_string(),
            ))
        }
    };

    let claims = jwt::Claims::new(user.email.as_str(), state.token_ttl());
    let access_token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
