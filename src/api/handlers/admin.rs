use crate::api::dtos::requests::{AddUserRequest, UpdateUserRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::user::{Role, User};
use crate::domain::ports::UserRepository;
use crate::domain::services::policy::{self, Action};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

pub async fn manage(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    policy::authorize(&user, Action::AdministerUsers)?;

    let users = state.user_repo.list_all().await?;

    Ok(Json(users))
}

pub async fn add_user_form(AuthUser(user): AuthUser) -> Result<impl IntoResponse, AppError> {
    policy::authorize(&user, Action::AdministerUsers)?;

    Ok(StatusCode::OK)
}

pub async fn add_user(
    State(state): State<Arc<AppState>>,
    AuthUser(admin): AuthUser,
    Json(payload): Json<AddUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    policy::authorize(&admin, Action::AdministerUsers)?;

    if payload.username.trim().is_empty() {
        return Err(AppError::Validation("Username must not be empty".to_string()));
    }

    let role: Role = payload.role.parse()?;

    if state
        .user_repo
        .find_by_username(&payload.username)
        .await?
        .is_some()
    {
        return Err(AppError::DuplicateUsername);
    }

    let teacher_id = match payload.teacher_id.filter(|t| !t.is_empty()) {
        Some(tid) => {
            ensure_teacher_reference(state.user_repo.as_ref(), &tid).await?;
            Some(tid)
        }
        None => None,
    };

    let password_hash = state.auth_service.hash_password(&payload.password)?;
    let mut user = User::new(
        payload.username,
        password_hash,
        role,
        payload.full_name.unwrap_or_default(),
    );
    user.teacher_id = teacher_id;

    let created = state.user_repo.create(&user).await?;

    info!("Admin {} created user {} with role {}", admin.id, created.id, created.role);

    Ok(Json(created))
}

pub async fn edit_user_form(
    State(state): State<Arc<AppState>>,
    AuthUser(admin): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    policy::authorize(&admin, Action::AdministerUsers)?;

    let user = state
        .user_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

pub async fn edit_user(
    State(state): State<Arc<AppState>>,
    AuthUser(admin): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    policy::authorize(&admin, Action::AdministerUsers)?;

    let mut target = state
        .user_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if let Some(username) = payload.username.filter(|u| !u.trim().is_empty()) {
        if username != target.username
            && state
                .user_repo
                .find_by_username(&username)
                .await?
                .is_some()
        {
            return Err(AppError::DuplicateUsername);
        }
        target.username = username;
    }

    if let Some(full_name) = payload.full_name {
        target.full_name = full_name;
    }

    if let Some(role) = payload.role {
        target.role = role.parse()?;
    }

    if let Some(password) = payload
        .password
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
    {
        target.password_hash = state.auth_service.hash_password(&password)?;
    }

    // teacher_id is rewritten wholesale: a blank or missing field clears the
    // supervision link, a value must point at an existing guru.
    target.teacher_id = match payload.teacher_id.filter(|t| !t.is_empty()) {
        Some(tid) => {
            ensure_teacher_reference(state.user_repo.as_ref(), &tid).await?;
            Some(tid)
        }
        None => None,
    };

    let updated = state.user_repo.update(&target).await?;

    info!("Admin {} updated user {}", admin.id, updated.id);

    Ok(Json(updated))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    AuthUser(admin): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let target = state
        .user_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    policy::authorize(&admin, Action::DeleteUser(&target))?;

    state.user_repo.delete_with_entries(&target.id).await?;
    state.auth_service.close_sessions_for(&target.id).await?;

    info!("Admin {} deleted user {}", admin.id, target.id);

    Ok(Json(json!({ "status": "deleted" })))
}

/// Write-time referential check: there is no foreign key on users.teacher_id,
/// so a supplied value must name an existing guru before it is stored.
async fn ensure_teacher_reference(
    users: &dyn UserRepository,
    teacher_id: &str,
) -> Result<(), AppError> {
    match users.find_by_id(teacher_id).await? {
        Some(teacher) if teacher.role == Role::Guru => Ok(()),
        Some(_) => Err(AppError::Validation(
            "teacher_id must reference a guru account".to_string(),
        )),
        None => Err(AppError::Validation(
            "teacher_id references no existing user".to_string(),
        )),
    }
}
