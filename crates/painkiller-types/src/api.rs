use serde::{Deserialize, Serialize};

use crate::models::Creator;

// -- JWT Claims --

/// Claims carried by an access token. `sub` is the username the token was
/// issued to. Shared by painkiller-auth (issue/validate) and painkiller-api
/// (middleware).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// OAuth2 password-grant form. `grant_type`, `scope` and the client fields
/// that form-based clients send alongside are accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: Creator,
}

impl TokenResponse {
    pub fn bearer(access_token: String, user: Creator) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            user,
        }
    }
}

// -- Pains --

#[derive(Debug, Deserialize)]
pub struct CreatePainRequest {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListPainsQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

// -- Votes --

#[derive(Debug, Deserialize)]
pub struct CastVoteRequest {
    pub pain_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoteCheckResponse {
    pub has_voted: bool,
}

// -- Misc --

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}
