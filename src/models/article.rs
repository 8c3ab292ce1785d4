use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ArticleKeyword {
    pub keyword: String,
    pub score: i32,
}

/// An externally sourced article with its precomputed scored keyword list.
/// The keyword list is stored exactly as supplied; lowercasing happens at
/// comparison time in the matcher.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub keywords: Vec<ArticleKeyword>,
}

#[derive(FromRow, Debug)]
pub struct ArticleRow {
    pub id: i32,
    pub article_id: i32,
    pub title: String,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// One row of the articles/keywords LEFT JOIN; keyword columns are null for
/// articles without any stored keyword.
#[derive(FromRow, Debug)]
pub struct ArticleKeywordJoinRow {
    pub article_id: i32,
    pub title: String,
    pub content: String,
    pub keyword: Option<String>,
    pub score: Option<i32>,
}
