use crate::api::extractors::auth::SESSION_COOKIE;
use crate::domain::models::auth::{AuthResponse, UserProfile};
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use time::Duration;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};
use tracing::info;

#[derive(serde::Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login_form() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Unknown username and wrong password answer identically.
    let user = state
        .user_repo
        .find_by_username(&payload.username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !state
        .auth_service
        .verify_password(&payload.password, &user.password_hash)
    {
        return Err(AppError::InvalidCredentials);
    }

    let token = state.auth_service.open_session(&user).await?;
    set_session_cookie(&cookies, token, state.config.session_ttl_hours);

    info!("User logged in: {}", user.id);

    Ok(Json(AuthResponse {
        user: UserProfile::from(&user),
    }))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<impl IntoResponse, AppError> {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        let _ = state.auth_service.close_session(cookie.value()).await;
    }

    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").into());

    info!("User logged out");

    Ok(StatusCode::OK)
}

fn set_session_cookie(cookies: &Cookies, token: String, ttl_hours: i64) {
    let mut session_c = Cookie::new(SESSION_COOKIE, token);
    session_c.set_http_only(true);
    session_c.set_secure(true);
    session_c.set_same_site(SameSite::Strict);
    session_c.set_path("/");
    session_c.set_max_age(Duration::hours(ttl_hours));
    cookies.add(session_c);
}
