use axum::{
    Json,
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use painkiller_auth::CredentialError;
use painkiller_db::DbError;
use painkiller_types::api::ErrorBody;

pub const NOT_AUTHENTICATED: &str = "Not authenticated";
pub const INVALID_CREDENTIALS: &str = "Could not validate credentials";
pub const BAD_LOGIN: &str = "Incorrect username or password";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Duplicate username, email or vote. Reported as 400.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::UsernameTaken | DbError::EmailTaken | DbError::AlreadyVoted => {
                Self::Conflict(e.to_string())
            }
            DbError::PainNotFound | DbError::UserNotFound => Self::NotFound(e.to_string()),
            DbError::LockPoisoned(_) | DbError::Sqlite(_) => Self::Internal(e.to_string()),
        }
    }
}

impl From<CredentialError> for ApiError {
    fn from(e: CredentialError) -> Self {
        match e {
            CredentialError::Expired | CredentialError::InvalidToken => {
                Self::Unauthorized(INVALID_CREDENTIALS)
            }
            CredentialError::Hash(_)
            | CredentialError::MalformedHash(_)
            | CredentialError::Sign(_)
            | CredentialError::ExpiryOutOfRange => Self::Internal(e.to_string()),
        }
    }
}

// Malformed bodies, forms, queries and path segments all answer 422 with a
// `detail` body, like any other validation failure.

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let detail = match self {
            Self::Internal(msg) => {
                error!("Request failed: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorBody { detail });
        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}
