use crate::api::handlers::{admin, auth, dashboard, entry, export, health, student};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_cookies::CookieManagerLayer;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Landing and auth
        .route("/", get(dashboard::index))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))

        // Role-shaped dashboard
        .route("/dashboard", get(dashboard::dashboard))

        // Journal entries (siswa)
        .route("/student/input", get(entry::input_form).post(entry::submit_entry))

        // Student management (guru)
        .route("/guru/add_student", get(student::add_student_form).post(student::add_student))
        .route("/guru/edit_student/{id}", get(student::edit_student_form).post(student::edit_student))
        .route("/guru/delete_student/{id}", post(student::delete_student))

        // Account administration (admin)
        .route("/admin/manage", get(admin::manage))
        .route("/admin/add_user", get(admin::add_user_form).post(admin::add_user))
        .route("/admin/edit_user/{id}", get(admin::edit_user_form).post(admin::edit_user))
        .route("/admin/delete_user/{id}", post(admin::delete_user))

        // Rekap download
        .route("/export/teacher/{teacher_id}", get(export::export_teacher))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    info_span!(
                        "http_request",
                        request_id = %Uuid::new_v4(),
                        method = %request.method(),
                        uri = %request.uri(),
                        user_id = tracing::field::Empty,
                        role = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("handling {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "request completed"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request errored: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
