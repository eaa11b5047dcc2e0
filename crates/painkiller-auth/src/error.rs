use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("failed to sign token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),

    #[error("token lifetime does not fit in a timestamp")]
    ExpiryOutOfRange,

    #[error("token has expired")]
    Expired,

    #[error("token is invalid")]
    InvalidToken,
}
