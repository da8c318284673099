use clearlabel::ai::HttpAiGateway;
use clearlabel::api::auth::StoreIdentityResolver;
use clearlabel::api::{self, AppState};
use clearlabel::config;
use clearlabel::errors::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the application settings
    let settings = config::settings::load()
        .inspect_err(|e| error!("Failed to load application settings: {e}"))?;
    info!("Successfully processed application settings.");

    // 4. Initialize the database
    let db = config::database::create_connection(&settings.database_url)
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db).await?;

    // 5. Seed identity records listed in config.toml (if any)
    config::database::seed_users(&db, &settings.users)
        .await
        .inspect_err(|e| error!("Failed to seed users: {e}"))?;

    // 6. Wire the collaborators and serve
    let gateway = HttpAiGateway::new(
        settings.ai.base_url.clone(),
        Duration::from_secs(settings.ai.timeout_secs),
    );
    if settings.ai.base_url.is_none() {
        info!("No AI service configured; analyses will use the local fallback.");
    }
    let state = AppState::new(
        db.clone(),
        Arc::new(gateway),
        Arc::new(StoreIdentityResolver::new(db)),
    );

    api::serve(&settings.bind_addr, state).await
}
