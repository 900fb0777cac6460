use crate::api::dtos::responses::{AdminDashboard, GuruDashboard, LandingResponse, SiswaDashboard};
use crate::api::extractors::{auth::AuthUser, maybe_auth::MaybeAuthUser};
use crate::domain::models::auth::UserProfile;
use crate::domain::models::user::Role;
use crate::domain::services::policy::{self, Action};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// Landing page. Works for guests and logged-in users alike.
pub async fn index(MaybeAuthUser(user): MaybeAuthUser) -> impl IntoResponse {
    Json(LandingResponse {
        user: user.as_ref().map(UserProfile::from),
    })
}

/// One endpoint, three shapes: what the dashboard carries depends on the role
/// of whoever asks.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Response, AppError> {
    policy::authorize(&user, Action::ViewDashboard)?;

    match user.role {
        Role::Siswa => {
            let entries = state.entry_repo.list_by_student(&user.id).await?;
            Ok(Json(SiswaDashboard {
                user: UserProfile::from(&user),
                entries,
            })
            .into_response())
        }
        Role::Guru => {
            let students = state.user_repo.list_students_of(&user.id).await?;
            // No students means no entry query at all.
            let entries = if students.is_empty() {
                Vec::new()
            } else {
                state.entry_repo.list_for_teacher(&user.id).await?
            };
            Ok(Json(GuruDashboard {
                user: UserProfile::from(&user),
                students,
                entries,
            })
            .into_response())
        }
        Role::Admin => {
            let gurus = state.user_repo.list_by_role(Role::Guru).await?;
            let siswa = state.user_repo.list_by_role(Role::Siswa).await?;
            Ok(Json(AdminDashboard {
                user: UserProfile::from(&user),
                gurus,
                siswa,
            })
            .into_response())
        }
    }
}
