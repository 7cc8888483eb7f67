use crate::router::create_router;
use crate::schemas::AppState;
use crate::session::SessionStore;
use axum::{http::StatusCode, Router};
use axum_extra::extract::cookie::Cookie;
use axum_test::TestServer;
use common::Credentials;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Create an in-memory SQLite database for testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    db.execute_unprepared("PRAGMA foreign_keys = ON")
        .await
        .expect("Failed to enable foreign keys");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create AppState for testing
pub async fn setup_test_app_state() -> AppState {
    let db = setup_test_db().await;

    AppState {
        db,
        sessions: SessionStore::new(100, Duration::from_secs(600)),
        request_timeout: Duration::from_secs(30),
    }
}

/// Initialize tracing for tests with output to STDERR.
///
/// The log level comes from RUST_LOG, defaulting to WARN.
pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| match level.to_uppercase().as_str() {
            "ERROR" => Some(Level::ERROR),
            "WARN" => Some(Level::WARN),
            "INFO" => Some(Level::INFO),
            "DEBUG" => Some(Level::DEBUG),
            "TRACE" => Some(Level::TRACE),
            _ => None,
        })
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}

/// Create axum app for testing
pub async fn setup_test_app() -> Router {
    let state = setup_test_app_state().await;
    create_router(state)
}

/// Test server plus the state behind it, for tests that inspect the database.
pub async fn setup_test_server() -> (TestServer, AppState) {
    let state = setup_test_app_state().await;
    let server = TestServer::new(create_router(state.clone())).unwrap();
    (server, state)
}

/// Sign up and log in, returning the session cookie.
pub async fn signup_and_login(server: &TestServer, username: &str, password: &str) -> Cookie<'static> {
    let credentials = Credentials::new(username, password);
    server.post("/signup").json(&credentials).await.assert_status(StatusCode::CREATED);

    let response = server.post("/login").json(&credentials).await;
    response.assert_status_ok();
    response.cookie("session")
}
