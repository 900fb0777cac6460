use crate::api::dtos::requests::{AddStudentRequest, UpdateStudentRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::user::{Role, User};
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

pub async fn add_student_form(AuthUser(user): AuthUser) -> Result<impl IntoResponse, AppError> {
    policy::authorize(&user, Action::AddStudent)?;

    Ok(StatusCode::OK)
}

/// Creates a siswa account supervised by the calling guru.
pub async fn add_student(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<AddStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    policy::authorize(&user, Action::AddStudent)?;

    if payload.username.trim().is_empty() {
        return Err(AppError::Validation("Username must not be empty".to_string()));
    }

    if state
        .user_repo
        .find_by_username(&payload.username)
        .await?
        .is_some()
    {
        return Err(AppError::DuplicateUsername);
    }

    let password_hash = state.auth_service.hash_password(&payload.password)?;
    let mut student = User::new(payload.username, password_hash, Role::Siswa, payload.full_name);
    student.teacher_id = Some(user.id.clone());

    let created = state.user_repo.create(&student).await?;

    info!("Guru {} added student {}", user.id, created.id);

    Ok(Json(created))
}

pub async fn edit_student_form(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let student = state
        .user_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

    policy::authorize(&user, Action::ManageStudent(&student))?;

    Ok(Json(student))
}

pub async fn edit_student(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut student = state
        .user_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

    policy::authorize(&user, Action::ManageStudent(&student))?;

    student.full_name = payload.full_name;

    // A blank password field means "keep the current one".
    if let Some(password) = payload
        .password
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
    {
        student.password_hash = state.auth_service.hash_password(&password)?;
    }

    let updated = state.user_repo.update(&student).await?;

    info!("Guru {} updated student {}", user.id, updated.id);

    Ok(Json(updated))
}

pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let student = state
        .user_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

    policy::authorize(&user, Action::ManageStudent(&student))?;

    state.user_repo.delete_with_entries(&student.id).await?;
    state.auth_service.close_sessions_for(&student.id).await?;

    info!("Guru {} deleted student {} and their entries", user.id, student.id);

    Ok(Json(json!({ "status": "deleted" })))
}
