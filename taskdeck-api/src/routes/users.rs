/// User endpoints
///
/// # Endpoints
///
/// - `POST /users/` - Register a new user
/// - `GET /users/` - List users (authenticated)

use crate::{
    app::AppState,
    error::{validation_failure, ApiResult},
    middleware::auth::CurrentUser,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use taskdeck_shared::{
    auth::password,
    models::user::{CreateUser, User},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Plaintext password, hashed before storage
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// User record as exposed over the API
///
/// Never carries the password digest.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID
    pub id: i64,

    /// Email address
    pub email: String,

    /// Whether the account is active
    pub is_active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
        }
    }
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /users/
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "secret123"
/// }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Email already registered
/// - `422 Unprocessable Entity`: Validation failed
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    req.validate().map_err(validation_failure)?;

    let hashed_password = password::hash_password(&req.password)?;

    // A duplicate email trips the unique constraint and surfaces as 409
    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            hashed_password,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// List all users
///
/// Requires a valid bearer token.
///
/// # Endpoint
///
/// ```text
/// GET /users/
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
pub async fn list_users(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = User::list(&state.db).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
