use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use jurnal_backend::{
    config::Config,
    api::router::create_router,
    domain::services::auth_service::AuthService,
    infra::factory::seed_default_accounts,
    infra::repositories::{
        sqlite_entry_repo::SqliteEntryRepo, sqlite_session_repo::SqliteSessionRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    state::AppState,
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    /// Fresh app over a throwaway SQLite file, with the default accounts
    /// (admin/admin123, guru1/guru123, siswa1/siswa123) seeded.
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            session_ttl_hours: 168,
        };

        let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
        let session_repo = Arc::new(SqliteSessionRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(session_repo, &config));

        seed_default_accounts(user_repo.as_ref(), &auth_service).await;

        let state = Arc::new(AppState {
            config,
            user_repo,
            entry_repo: Arc::new(SqliteEntryRepo::new(pool.clone())),
            auth_service,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Logs in over the real endpoint and returns the raw session token from
    /// the Set-Cookie header. Panics on failure, so tests read top to bottom.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let payload = serde_json::json!({
            "username": username,
            "password": password
        });

        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let session_cookie = cookies
            .iter()
            .find(|c| c.contains("session_token="))
            .expect("No session_token cookie returned");

        let start = session_cookie.find("session_token=").unwrap() + "session_token=".len();
        let end = session_cookie[start..]
            .find(';')
            .unwrap_or(session_cookie.len() - start);

        session_cookie[start..start + end].to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
