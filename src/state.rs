use std::path::PathBuf;
use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::services::articles::ArticleStore;
use crate::services::keyword_extraction::SentenceEncoder;
use crate::services::scrapper::ScrapperClient;
use crate::services::topics::TopicStore;

/// Shared handler state. The stores are process-wide caches; axum handles
/// requests concurrently, so both sit behind a lock, and collaborator I/O is
/// done before the lock is taken.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub topics: Arc<RwLock<TopicStore>>,
    pub articles: Arc<RwLock<ArticleStore>>,
    pub encoder: Option<Arc<dyn SentenceEncoder>>,
    pub scrapper: ScrapperClient,
    pub roadmap_html_path: PathBuf,
}

impl AppState {
    pub fn new(db: PgPool, encoder: Option<Arc<dyn SentenceEncoder>>, config: &Config) -> Self {
        AppState {
            db,
            topics: Arc::new(RwLock::new(TopicStore::new())),
            articles: Arc::new(RwLock::new(ArticleStore::new())),
            encoder,
            scrapper: ScrapperClient::new(config.scrapper_url.clone()),
            roadmap_html_path: PathBuf::from(&config.roadmap_html_path),
        }
    }
}
