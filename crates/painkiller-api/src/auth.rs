use std::sync::Arc;

use axum::{Extension, Form, Json, extract::State, response::IntoResponse};
use axum_extra::extract::WithRejection;
use tracing::{info, warn};

use painkiller_auth::{TokenKeys, hash_password, verify_password};
use painkiller_db::Database;
use painkiller_types::api::{LoginForm, RegisterRequest, TokenResponse};
use painkiller_types::models::Creator;

use crate::blocking;
use crate::error::{ApiError, BAD_LOGIN};
use crate::middleware::CurrentUser;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub tokens: TokenKeys,
    pub token_ttl: chrono::Duration,
    /// Upper bound applied to `GET /pains?limit=`.
    pub max_list_limit: u32,
}

pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    validate_registration(&req)?;

    let user = blocking(&state, move |db| -> Result<_, ApiError> {
        let password_hash = hash_password(&req.password)?;
        Ok(db.create_user(&req.username, &req.email, &password_hash)?)
    })
    .await
    .inspect_err(|e| {
        if let ApiError::Conflict(reason) = e {
            warn!("Registration rejected: {}", reason);
        }
    })?;

    Ok(Json(user))
}

pub async fn login(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<LoginForm>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let username = form.username.clone();

    let user = blocking(&state, move |db| -> Result<_, ApiError> {
        let row = db
            .get_user_by_username(&form.username)?
            .ok_or(ApiError::Unauthorized(BAD_LOGIN))?;

        if !verify_password(&form.password, &row.password_hash)? {
            return Err(ApiError::Unauthorized(BAD_LOGIN));
        }
        Ok(row.to_user())
    })
    .await
    .inspect_err(|e| {
        if matches!(e, ApiError::Unauthorized(_)) {
            warn!("Authentication failed for user {}", username);
        }
    })?;

    let token = state.tokens.issue(&user.username, state.token_ttl)?;
    info!("Issued access token for user {}", user.username);

    Ok(Json(TokenResponse::bearer(token, Creator::from(&user))))
}

pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> impl IntoResponse {
    Json(user)
}

/// Input checks that run before the store is touched.
fn validate_registration(req: &RegisterRequest) -> Result<(), ApiError> {
    if req.username.trim().is_empty() {
        return Err(ApiError::Validation("Username must not be empty".into()));
    }
    if req.password.is_empty() {
        return Err(ApiError::Validation("Password must not be empty".into()));
    }
    if !is_valid_email(&req.email) {
        return Err(ApiError::Validation(
            "value is not a valid email address".into(),
        ));
    }
    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}
