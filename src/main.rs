use std::sync::Arc;

use buhpro_api::{
    app::credential_hasher, auth::TokenService, build_router, db, AppConfig, AppState,
    StorageBackend,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "buhpro_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("BuhPro API - Starting...");

    let config = AppConfig::from_env()?;
    let tokens = Arc::new(TokenService::new(&config.jwt_secret));
    let hasher = credential_hasher(&config.hashing)?;

    let state = match (config.storage_backend, config.database_url.as_deref()) {
        (StorageBackend::Postgres, Some(database_url)) => {
            tracing::info!("Connecting to database...");
            let pool = db::create_pool(database_url, config.db_max_connections).await?;
            db::run_migrations(&pool).await?;
            AppState::postgres(pool, tokens, hasher)
        }
        (StorageBackend::Postgres, None) => {
            return Err(buhpro_api::ConfigError::Missing("DATABASE_URL").into());
        }
        (StorageBackend::Memory, _) => {
            tracing::warn!("Using in-memory storage; data will not survive a restart");
            AppState::in_memory(tokens, hasher)
        }
    };

    let app = build_router(state, &config);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("BuhPro API is running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
