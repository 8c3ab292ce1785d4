use anyhow::Error;
use axum::extract::{Path, State};
use axum::{http::StatusCode, Json};
use serde::Serialize;
use tracing::{error, info};

use crate::db::article::{check_article_exists, get_all_articles_with_keywords, insert_article};
use crate::db::keyword::insert_keywords;
use crate::models::{Article, ArticleKeyword};
use crate::services::articles::{articles_from_rows, mock_article as build_mock_article};
use crate::services::keyword_extraction::{extract_keywords, DEFAULT_KEYWORD_COUNT};
use crate::state::AppState;

/// Only the head of an article is scored; embedding whole articles is too
/// slow for request-time analysis.
const ANALYZED_CONTENT_CHARS: usize = 200;

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub status: &'static str,
    pub article_id: i32,
    pub title: String,
    pub keywords: Vec<ArticleKeyword>,
}

#[derive(Serialize)]
pub struct MockArticleResponse {
    pub status: &'static str,
    pub article_id: i32,
    pub title: String,
    pub content: String,
    pub keywords: Vec<ArticleKeyword>,
}

#[derive(Serialize)]
pub struct ArticlesResponse {
    pub status: &'static str,
    pub count: usize,
    pub articles: Vec<Article>,
}

pub async fn analyze_article(
    State(state): State<AppState>,
    Path(article_id): Path<i32>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, String)> {
    let Some(encoder) = state.encoder.as_deref() else {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "sentence encoder is not available".to_string(),
        ));
    };

    let scrapped = state.scrapper.fetch_article(article_id).await.map_err(|e| {
        error!("failed to fetch article {} from scrapper: {}", article_id, e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    info!("received article {:?} for analysis", scrapped.name);

    let truncated: String = scrapped.text.chars().take(ANALYZED_CONTENT_CHARS).collect();

    let keywords = extract_keywords(encoder, &truncated, DEFAULT_KEYWORD_COUNT).map_err(|e| {
        error!("keyword extraction failed for article {}: {}", article_id, e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    info!("extracted {} keywords from article {}", keywords.len(), article_id);

    save_analyzed_article(&state, article_id, &scrapped.name, &truncated, &keywords)
        .await
        .map_err(|e| {
            error!("failed to save article {}: {}", article_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    Ok(Json(AnalyzeResponse {
        status: "success",
        article_id,
        title: scrapped.name,
        keywords,
    }))
}

pub async fn mock_article() -> Json<MockArticleResponse> {
    let article = build_mock_article();

    Json(MockArticleResponse {
        status: "success",
        article_id: article.id,
        title: article.title,
        content: article.content,
        keywords: article.keywords,
    })
}

pub async fn get_articles(
    State(state): State<AppState>,
) -> Result<Json<ArticlesResponse>, (StatusCode, String)> {
    match get_all_articles_with_keywords(&state.db).await {
        Ok(rows) => {
            let articles = articles_from_rows(rows);
            info!("returning {} stored articles", articles.len());
            Ok(Json(ArticlesResponse {
                status: "success",
                count: articles.len(),
                articles,
            }))
        }
        Err(e) => {
            error!("failed to load articles from the database: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

async fn save_analyzed_article(
    state: &AppState,
    article_id: i32,
    title: &str,
    content: &str,
    keywords: &[ArticleKeyword],
) -> Result<(), Error> {
    if check_article_exists(&state.db, article_id).await? {
        info!("article {} is already in the database", article_id);
        return Ok(());
    }

    insert_article(&state.db, article_id, title, content).await?;
    insert_keywords(&state.db, article_id, keywords).await?;
    Ok(())
}
