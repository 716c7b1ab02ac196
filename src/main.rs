use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use brandgen_core::{AiClients, SqliteProjectStore, core_config_from_env};

/// Main entry point for the brandgen service
///
/// Resolves configuration once, opens the project store and serves the REST API.
///
/// # Environment Variables
/// - `BRANDGEN_REST_ADDR`: REST server address (default: "0.0.0.0:5040")
/// - `BRANDGEN_DB_PATH`: SQLite database file (default: "brandgen.db")
/// - `BRANDGEN_DEFAULT_USER_ID`: owner used when no `x-user-id` header is sent
/// - `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `BRANDGEN_TEXT_MODEL`, `BRANDGEN_IMAGE_MODEL`,
///   `BRANDGEN_IMAGE_SIZE`, `BRANDGEN_AI_TIMEOUT_SECS`: AI API settings
///
/// # Errors
/// Returns an error if:
/// - the configuration is invalid,
/// - the database cannot be opened,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("brandgen_run=info".parse()?)
                .add_directive("brandgen_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("BRANDGEN_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:5040".into());

    let cfg = Arc::new(core_config_from_env()?);
    if cfg.ai().api_key().is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; all generated content will use fallbacks");
    }

    let store = Arc::new(SqliteProjectStore::open(cfg.database_path())?);
    tracing::info!("++ Using database {}", cfg.database_path().display());

    let ai = AiClients::openai(cfg.ai())?;
    let app = router(AppState::new(cfg, store, ai));

    tracing::info!("++ Starting brandgen REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
