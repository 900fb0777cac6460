use crate::error::AppError;
use serde::Serialize;
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Account roles. Stored as lowercase strings in SQLite and rendered the same
/// way in API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Guru,
    Siswa,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Guru => write!(f, "guru"),
            Role::Siswa => write!(f, "siswa"),
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "guru" => Ok(Role::Guru),
            "siswa" => Ok(Role::Siswa),
            other => Err(AppError::Validation(format!("Unknown role: {other}"))),
        }
    }
}

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)] // never leaves the API
    pub password_hash: String,
    pub role: Role,
    pub full_name: String,
    /// For siswa accounts, the id of the supervising guru.
    pub teacher_id: Option<String>,
    pub group_name: Option<String>,
}

impl User {
    pub fn new(username: String, password_hash: String, role: Role, full_name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            password_hash,
            role,
            full_name,
            teacher_id: None,
            group_name: None,
        }
    }
}
