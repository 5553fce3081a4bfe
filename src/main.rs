mod config;
mod db;
mod error;
mod models;
mod pricing;
mod routes;
mod services;
mod state;
mod validation;

use crate::config::Config;
use crate::db::logs::LogStore;
use crate::db::users::UserStore;
use crate::services::gemini::GeminiClient;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prompt_gateway=info,tower_http=info".into()),
        )
        .init();

    // Load config
    let config = Config::from_env()?;
    let port = config.port;

    tracing::info!("Starting prompt gateway on port {}", port);

    // Open the shared store handle
    let client = db::connect(&config).await?;
    let database = client.database(&config.mongo_db_name);
    tracing::info!("Connected to database {}", config.mongo_db_name);

    // Build state
    let state = AppState {
        users: UserStore::new(&database),
        logs: LogStore::new(&database),
        gemini: GeminiClient::new(config.gemini_api_key)?,
    };

    routes::health::init_start_time();

    // Build router
    let app = routes::build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!("Listening on 0.0.0.0:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Teardown: flush and close the store connections
    client.shutdown().await;
    tracing::info!("Store connections closed, bye");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}
