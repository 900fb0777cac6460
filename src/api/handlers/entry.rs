use crate::api::dtos::{requests::NewEntryRequest, responses::EntryFormContext};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::entry::{Entry, PrayerSet};
use crate::domain::services::policy::{self, Action};
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub async fn input_form(AuthUser(user): AuthUser) -> Result<impl IntoResponse, AppError> {
    policy::authorize(&user, Action::SubmitEntry)?;

    Ok(Json(EntryFormContext { today: today() }))
}

pub async fn submit_entry(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<NewEntryRequest>,
) -> Result<impl IntoResponse, AppError> {
    policy::authorize(&user, Action::SubmitEntry)?;

    // An empty date string counts as absent, same as an unfilled form field.
    let date = payload
        .date
        .filter(|d| !d.is_empty())
        .unwrap_or_else(today);

    let entry = Entry {
        id: Uuid::new_v4().to_string(),
        student_id: user.id.clone(),
        date,
        wake_time: payload.wake_time.unwrap_or_default(),
        prayer: PrayerSet::from_labels(payload.prayer),
        sport: payload.sport.unwrap_or_default(),
        food_notes: payload.food_notes.unwrap_or_default(),
        study_notes: payload.study_notes.unwrap_or_default(),
        community_notes: payload.community_notes.unwrap_or_default(),
        sleep_time: payload.sleep_time.unwrap_or_default(),
        created_at: Utc::now(),
    };

    let created = state.entry_repo.create(&entry).await?;

    info!("Journal entry recorded for student {}", user.id);

    Ok(Json(created))
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
