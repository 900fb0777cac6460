use crate::config::Config;
use crate::domain::models::auth::SessionRecord;
use crate::domain::models::user::User;
use crate::domain::ports::SessionRepository;
use crate::error::AppError;
use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2, PasswordHash, PasswordVerifier};
use chrono::{Duration, Utc};
use rand::rngs::OsRng;
use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};
use std::sync::Arc;

pub struct AuthService {
    sessions: Arc<dyn SessionRepository>,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(sessions: Arc<dyn SessionRepository>, config: &Config) -> Self {
        Self {
            sessions,
            session_ttl: Duration::hours(config.session_ttl_hours),
        }
    }

    pub fn hash_password(&self, plain: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| AppError::InternalWithMsg(format!("Password hashing failed: {e}")))?;
        Ok(hash.to_string())
    }

    /// A stored hash that fails to parse verifies as false rather than
    /// surfacing an error, so login answers stay uniform.
    pub fn verify_password(&self, plain: &str, stored_hash: &str) -> bool {
        PasswordHash::new(stored_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    /// Issues a fresh opaque token for the user and persists only its hash.
    pub async fn open_session(&self, user: &User) -> Result<String, AppError> {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect();
        let now = Utc::now();

        let record = SessionRecord {
            token_hash: self.hash_token(&token),
            user_id: user.id.clone(),
            expires_at: now + self.session_ttl,
            created_at: now,
        };

        self.sessions.create(&record).await?;
        Ok(token)
    }

    /// Maps a cookie token back to the owning user id. Expired rows are
    /// deleted on sight and answered with None, which callers treat as a
    /// logged-out request.
    pub async fn resolve_session(&self, raw_token: &str) -> Result<Option<String>, AppError> {
        let token_hash = self.hash_token(raw_token);

        let Some(record) = self.sessions.find(&token_hash).await? else {
            return Ok(None);
        };

        if record.expires_at < Utc::now() {
            self.sessions.delete(&token_hash).await?;
            return Ok(None);
        }

        Ok(Some(record.user_id))
    }

    pub async fn close_session(&self, raw_token: &str) -> Result<(), AppError> {
        let token_hash = self.hash_token(raw_token);
        self.sessions.delete(&token_hash).await
    }

    /// Drops every live session of a user. Called when the account is removed
    /// so a deleted user cannot keep acting on an old cookie.
    pub async fn close_sessions_for(&self, user_id: &str) -> Result<(), AppError> {
        self.sessions.delete_for_user(user_id).await
    }

    pub fn hash_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }
}
