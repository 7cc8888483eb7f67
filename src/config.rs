use anyhow::Result;
use config::{Config, Environment, File};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::schemas::AppState;
use crate::session::SessionStore;

/// Runtime settings.
///
/// Layered lowest to highest: built-in defaults, an optional `encore.toml`
/// (or `.yaml`/`.json`) in the working directory, then `ENCORE_*`
/// environment variables. CLI flags override the result.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    /// Idle lifetime of a login session
    pub session_ttl_secs: u64,
    /// Maximum number of live sessions kept in memory
    pub session_capacity: u64,
    pub request_timeout_secs: u64,
}

impl Settings {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = Config::builder()
            .set_default("database_url", "sqlite://encore.db?mode=rwc")?
            .set_default("bind_address", "0.0.0.0:3000")?
            .set_default("session_ttl_secs", 86_400_i64)?
            .set_default("session_capacity", 10_000_i64)?
            .set_default("request_timeout_secs", 30_i64)?
            .add_source(File::with_name("encore").required(false))
            .add_source(Environment::with_prefix("ENCORE"))
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Connect to the database and build the shared application state.
pub async fn initialize_app_state(settings: &Settings) -> Result<AppState> {
    info!("Connecting to database: {}", settings.database_url);
    let db = Database::connect(&settings.database_url).await?;

    let sessions = SessionStore::new(settings.session_capacity, settings.session_ttl());

    Ok(AppState {
        db,
        sessions,
        request_timeout: settings.request_timeout(),
    })
}

/// Same as [`initialize_app_state`] but applies pending migrations first.
pub async fn initialize_migrated_app_state(settings: &Settings) -> Result<AppState> {
    let state = initialize_app_state(settings).await?;
    info!("Running database migrations");
    Migrator::up(&state.db, None).await?;
    Ok(state)
}
