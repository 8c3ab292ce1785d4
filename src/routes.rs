use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::config::Config;
use crate::handlers::article_handlers::{analyze_article, get_articles, mock_article};
use crate::handlers::roadmap_handlers::{extract_topics, match_article, update_roadmap};
use crate::state::AppState;

pub fn create_router(state: AppState, config: &Config) -> Router {
    let cors = create_cors_layer();
    let frontend = ServeDir::new(&config.frontend_dir).not_found_service(ServeFile::new(
        format!("{}/index.html", config.frontend_dir),
    ));

    Router::new()
        .route("/api/extract-topics", get(extract_topics))
        .route("/api/match-article", post(match_article))
        .route("/api/update-roadmap", post(update_roadmap))
        .route("/api/analyze/:article_id", get(analyze_article))
        .route("/api/mock-article", get(mock_article).post(mock_article))
        .route("/api/articles", get(get_articles))
        .fallback_service(frontend)
        .with_state(state)
        .layer(cors)
}

fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}
