use std::collections::BTreeSet;

use serde::Serialize;

/// A scored topic/article association. `article_id` is present when the match
/// was computed per-topic across all articles, and absent when a single
/// article was matched against every topic (the id is the caller's input
/// there).
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TopicMatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_id: Option<i32>,
    pub score: usize,
    pub matching_keywords: BTreeSet<String>,
}
