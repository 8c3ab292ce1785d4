use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use roadmap_analyzer::config::load_config;
use roadmap_analyzer::db::schema::init_db;
use roadmap_analyzer::routes::create_router;
use roadmap_analyzer::services::keyword_extraction::{MultilingualEncoder, SentenceEncoder};
use roadmap_analyzer::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    init_db(&pool).await?;

    let encoder: Option<Arc<dyn SentenceEncoder>> = match MultilingualEncoder::new() {
        Ok(encoder) => Some(Arc::new(encoder)),
        Err(e) => {
            warn!("sentence encoder unavailable, article analysis is disabled: {}", e);
            None
        }
    };

    let state = AppState::new(pool, encoder, &config);
    let app = create_router(state, &config);

    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    info!("listening on {}", config.server_address);
    axum::serve(listener, app).await?;

    Ok(())
}
