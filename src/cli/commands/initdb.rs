use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use tracing::info;

use crate::config::Settings;

/// Creates the schema, or brings an existing one up to date.
pub async fn init_database(settings: &Settings) -> Result<()> {
    info!("Initializing database at {}", settings.database_url);
    let db = Database::connect(&settings.database_url)
        .await
        .with_context(|| format!("connecting to {}", settings.database_url))?;

    Migrator::up(&db, None)
        .await
        .context("applying migrations")?;

    let applied = Migrator::get_applied_migrations(&db).await?.len();
    info!("Database ready with {} applied migration(s)", applied);
    Ok(())
}
