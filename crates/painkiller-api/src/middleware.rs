use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use tracing::debug;

use painkiller_types::models::User;

use crate::auth::AppState;
use crate::blocking;
use crate::error::{ApiError, INVALID_CREDENTIALS, NOT_AUTHENTICATED};

/// The authenticated caller, inserted as a request extension by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Validate the bearer token and resolve its subject to a stored user.
/// A valid token for a username that no longer exists is rejected.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let bearer = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(ApiError::Unauthorized(NOT_AUTHENTICATED))?;

    let claims = state.tokens.validate(bearer.token())?;

    let username = claims.sub;
    let user = blocking(&state, move |db| db.get_user_by_username(&username))
        .await?
        .ok_or_else(|| {
            debug!("Token subject no longer exists");
            ApiError::Unauthorized(INVALID_CREDENTIALS)
        })?;

    req.extensions_mut().insert(CurrentUser(user.to_user()));
    Ok(next.run(req).await)
}
