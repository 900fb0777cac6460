pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod state;

use crate::config::Config;
use crate::infra::factory::bootstrap_state;
use api::router::create_router;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Installs the global subscriber: pretty output on stdout, JSON into a
/// daily-rolling file under ./logs. The guard must outlive the server or the
/// file writer stops flushing.
pub fn init_logging() -> WorkerGuard {
    let (file_writer, guard) = tracing_appender::non_blocking(
        tracing_appender::rolling::daily("./logs", "jurnal-backend.log"),
    );

    let stdout_layer = tracing_subscriber::fmt::layer()
        .pretty()
        .with_target(false)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()));

    let file_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new("info,jurnal_backend=debug"));

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .init();

    info!("Logging initialized. Writing JSON logs to ./logs/");
    guard
}

pub async fn run() {
    let _guard = init_logging();

    let config = Config::from_env();
    let port = config.port;
    let state = Arc::new(bootstrap_state(&config).await);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("Failed to bind server port");

    info!("🚀 Server running on port {}", port);
    axum::serve(listener, app).await.expect("Server exited with error");
}
