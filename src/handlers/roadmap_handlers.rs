use std::path::Path;

use anyhow::Error;
use axum::{extract::State, http::StatusCode, Json};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::db::article::get_all_articles_with_keywords;
use crate::models::TopicMatch;
use crate::services::articles::{articles_from_rows, ArticleStore};
use crate::services::matching::{match_all_topics, match_one_article};
use crate::services::roadmap_rewrite::inject_article_links;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MatchArticleRequest {
    #[serde(default)]
    pub article_id: Option<i32>,
}

#[derive(Serialize)]
pub struct TopicPayload {
    pub title: String,
    pub subtopics: Vec<String>,
}

#[derive(Serialize)]
pub struct ExtractTopicsResponse {
    pub status: &'static str,
    pub topics_count: usize,
    pub topics: IndexMap<String, TopicPayload>,
}

#[derive(Serialize)]
pub struct MatchArticleResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_id: Option<i32>,
    pub matches_count: usize,
    pub matches: IndexMap<String, TopicMatch>,
}

#[derive(Serialize)]
pub struct UpdateRoadmapResponse {
    pub status: &'static str,
    pub message: String,
    pub matches_count: usize,
}

pub async fn extract_topics(
    State(state): State<AppState>,
) -> Result<Json<ExtractTopicsResponse>, (StatusCode, String)> {
    let mut topics = state.topics.write().await;
    topics.refresh_from_file(&state.roadmap_html_path);

    let payload: IndexMap<String, TopicPayload> = topics
        .topics()
        .iter()
        .map(|(topic_id, topic)| {
            (
                topic_id.clone(),
                TopicPayload {
                    title: topic.title.clone(),
                    subtopics: topic.subtopics.clone(),
                },
            )
        })
        .collect();

    Ok(Json(ExtractTopicsResponse {
        status: "success",
        topics_count: payload.len(),
        topics: payload,
    }))
}

pub async fn match_article(
    State(state): State<AppState>,
    Json(request): Json<MatchArticleRequest>,
) -> Result<Json<MatchArticleResponse>, (StatusCode, String)> {
    ensure_topics_loaded(&state).await;
    let matches = compute_matches(&state, request.article_id).await;

    Ok(Json(MatchArticleResponse {
        status: "success",
        article_id: request.article_id,
        matches_count: matches.len(),
        matches,
    }))
}

pub async fn update_roadmap(
    State(state): State<AppState>,
    Json(request): Json<MatchArticleRequest>,
) -> Result<Json<UpdateRoadmapResponse>, (StatusCode, String)> {
    ensure_topics_loaded(&state).await;
    let matches = compute_matches(&state, request.article_id).await;

    if matches.is_empty() {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            "no matches to apply to the roadmap".to_string(),
        ));
    }

    let articles = state.articles.read().await;
    match rewrite_roadmap_file(&state.roadmap_html_path, &matches, &articles) {
        Ok(()) => Ok(Json(UpdateRoadmapResponse {
            status: "success",
            message: "Роадмап успешно обновлен".to_string(),
            matches_count: matches.len(),
        })),
        Err(e) => {
            error!("failed to update the roadmap: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

/// Topics are extracted once and reused for the process lifetime;
/// `/api/extract-topics` is the explicit refresh.
async fn ensure_topics_loaded(state: &AppState) {
    let mut topics = state.topics.write().await;
    if topics.is_empty() {
        topics.refresh_from_file(&state.roadmap_html_path);
    }
}

async fn load_articles(state: &AppState, include_mock: bool) {
    if include_mock {
        state.articles.write().await.insert_mock();
    }

    match get_all_articles_with_keywords(&state.db).await {
        Ok(rows) => {
            let loaded = articles_from_rows(rows);
            info!("loaded {} articles from the database", loaded.len());
            state.articles.write().await.extend(loaded);
        }
        Err(e) => {
            // an unreachable database means "no stored articles", not a failed request
            error!("failed to load articles from the database: {}", e);
        }
    }
}

async fn compute_matches(
    state: &AppState,
    article_id: Option<i32>,
) -> IndexMap<String, TopicMatch> {
    load_articles(state, article_id.is_none()).await;

    let topics = state.topics.read().await;
    let articles = state.articles.read().await;

    match article_id {
        None => match_all_topics(topics.topics(), articles.articles()),
        Some(article_id) => match_one_article(article_id, topics.topics(), articles.articles()),
    }
}

fn rewrite_roadmap_file(
    path: &Path,
    matches: &IndexMap<String, TopicMatch>,
    articles: &ArticleStore,
) -> Result<(), Error> {
    let html = std::fs::read_to_string(path)?;
    let rewritten = inject_article_links(&html, matches, articles)?;
    std::fs::write(path, rewritten)?;
    info!("roadmap file {} updated", path.display());
    Ok(())
}
