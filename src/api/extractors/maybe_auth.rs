use crate::api::extractors::auth::SESSION_COOKIE;
use crate::domain::models::user::User;
use crate::state::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use std::sync::Arc;
use tower_cookies::Cookies;

/// Like [`super::auth::AuthUser`] but never rejects. Missing, expired or
/// otherwise unusable sessions all come back as a guest.
pub struct MaybeAuthUser(pub Option<User>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let Some(cookies) = parts.extensions.get::<Cookies>() else {
            return Ok(MaybeAuthUser(None));
        };

        let token = match cookies.get(SESSION_COOKIE) {
            Some(cookie) => cookie.value().to_string(),
            None => return Ok(MaybeAuthUser(None)),
        };

        let user_id = match app_state.auth_service.resolve_session(&token).await {
            Ok(Some(user_id)) => user_id,
            // Unknown or expired token -> treat as guest
            Ok(None) | Err(_) => return Ok(MaybeAuthUser(None)),
        };

        let user = match app_state.user_repo.find_by_id(&user_id).await {
            Ok(Some(user)) => user,
            Ok(None) | Err(_) => return Ok(MaybeAuthUser(None)),
        };

        Ok(MaybeAuthUser(Some(user)))
    }
}
