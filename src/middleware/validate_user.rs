use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// User confirmed to exist in the store. Handlers take this as the caller.
#[derive(Clone, Debug)]
pub struct ValidatedUser {
    pub id: i64,
    pub username: String,
}

/// Middleware that resolves the JWT subject against the users table.
/// Tokens for users that no longer exist are rejected with 401.
pub async fn validate_user_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("JWT authentication required before user validation"))?;

    let user = state.store().get_user(auth_user.user_id).await?.ok_or_else(|| {
        tracing::warn!(
            "User validation failed: user '{}' (ID: {}) not found",
            auth_user.username,
            auth_user.user_id
        );
        ApiError::unauthorized("Could not validate credentials")
    })?;

    tracing::debug!("User validation successful: {} ({})", user.username, user.id);

    request.extensions_mut().insert(ValidatedUser {
        id: user.id,
        username: user.username,
    });

    Ok(next.run(request).await)
}
