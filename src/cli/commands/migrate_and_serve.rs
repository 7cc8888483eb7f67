use anyhow::Result;
use tracing::{debug, error, info, trace};

use super::serve::run_server;
use crate::config::{initialize_migrated_app_state, Settings};

pub async fn migrate_and_serve(settings: &Settings) -> Result<()> {
    trace!("Entering migrate_and_serve function");
    info!("Applying database migrations and starting server");
    debug!("Database URL: {}", settings.database_url);

    let state = initialize_migrated_app_state(settings)
        .await
        .inspect_err(|e| error!("Failed to migrate and initialize application state: {}", e))?;
    info!("Database migrations completed successfully");

    run_server(state, &settings.bind_address).await
}
