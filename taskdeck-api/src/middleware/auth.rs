/// Bearer-token authentication extractors
///
/// Protected handlers declare a [`CurrentUser`] argument. Extraction
/// validates the `Authorization: Bearer <token>` header, then loads the
/// user record named by the token's subject. The resolved identity is
/// passed explicitly into the handler rather than living in any ambient
/// session state.
///
/// # Example
///
/// ```no_run
/// use taskdeck_api::middleware::auth::CurrentUser;
///
/// async fn protected_handler(current: CurrentUser) -> String {
///     format!("Hello, {}!", current.email)
/// }
/// ```

use axum::{async_trait, extract::FromRequestParts, http::header, http::request::Parts};

use crate::{app::AppState, error::ApiError};
use taskdeck_shared::{auth::jwt, models::user::User};

/// The authenticated caller, resolved from a bearer token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User ID of the caller
    pub id: i64,

    /// Email address of the caller
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApiError::Unauthorized("Missing authorization header".to_string())
            })?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::BadRequest("Expected Bearer token".to_string()))?;

        let claims = jwt::validate_token(token, state.jwt_secret())?;

        // The subject must still resolve to a stored user; a valid token
        // alone is not enough.
        let user = User::find_by_email(&state.db, &claims.sub)
            .await?
            .ok_or_else(|| {
                ApiError::Unauthorized("Could not validate credentials".to_string())
            })?;

        Ok(CurrentUser {
            id: user.id,
            email: user.email,
        })
    }
}

/// An optionally authenticated caller
///
/// Yields `None` when no `Authorization` header is present. A header that
/// is present but invalid still rejects the request.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<CurrentUser>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if parts.headers.get(header::AUTHORIZATION).is_none() {
            return Ok(OptionalUser(None));
        }

        let current = CurrentUser::from_request_parts(parts, state).await?;
        Ok(OptionalUser(Some(current)))
    }
}
