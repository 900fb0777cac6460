use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::models::user::{Role, User};
use crate::domain::ports::UserRepository;
use crate::domain::services::auth_service::AuthService;
use crate::infra::repositories::{
    sqlite_entry_repo::SqliteEntryRepo, sqlite_session_repo::SqliteSessionRepo,
    sqlite_user_repo::SqliteUserRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL Mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_sqlite_migrations(&pool).await;

    let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
    let session_repo = Arc::new(SqliteSessionRepo::new(pool.clone()));
    let auth_service = Arc::new(AuthService::new(session_repo, config));

    seed_default_accounts(user_repo.as_ref(), &auth_service).await;

    AppState {
        config: config.clone(),
        user_repo,
        entry_repo: Arc::new(SqliteEntryRepo::new(pool.clone())),
        auth_service,
    }
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}

/// First-boot convenience: when the users table is empty, one account per role
/// is created so the app is usable straight away. Any existing row, whatever
/// its role, suppresses seeding.
pub async fn seed_default_accounts(users: &dyn UserRepository, auth: &AuthService) {
    let count = users
        .count()
        .await
        .expect("Failed to inspect users table for seeding");
    if count > 0 {
        return;
    }

    info!("Users table is empty, seeding one account per role");

    let admin = User::new(
        "admin".to_string(),
        auth.hash_password("admin123").expect("Failed to hash seed password"),
        Role::Admin,
        "Administrator".to_string(),
    );
    users.create(&admin).await.expect("Failed to seed admin account");

    let guru = User::new(
        "guru1".to_string(),
        auth.hash_password("guru123").expect("Failed to hash seed password"),
        Role::Guru,
        "Guru Pembimbing 1".to_string(),
    );
    let guru = users.create(&guru).await.expect("Failed to seed guru account");

    let mut siswa = User::new(
        "siswa1".to_string(),
        auth.hash_password("siswa123").expect("Failed to hash seed password"),
        Role::Siswa,
        "Siswa Contoh".to_string(),
    );
    siswa.teacher_id = Some(guru.id.clone());
    users.create(&siswa).await.expect("Failed to seed siswa account");
}
