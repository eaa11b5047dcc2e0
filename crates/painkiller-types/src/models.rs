use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public projection of a registered user. The password hash never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Identity fields embedded in token responses and pain listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<&User> for Creator {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pain {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
    pub votes_count: i64,
}

/// A pain as it appears in the public listing: joined with its creator and
/// annotated with the number of votes it has received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PainListing {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
    pub votes_count: i64,
    pub creator: Creator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: i64,
    pub pain_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}
