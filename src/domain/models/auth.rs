use crate::domain::models::user::{Role, User};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A server-side session row. Only the SHA-256 hash of the cookie token is
/// stored, so a leaked database dump cannot be replayed as a login.
#[derive(Debug, FromRow)]
pub struct SessionRecord {
    pub token_hash: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub user: UserProfile,
}

#[derive(Serialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub full_name: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
            full_name: user.full_name.clone(),
        }
    }
}
