use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;
use tracing::{info, warn};

use crate::models::{Article, Topic, TopicMatch};

fn lowercased_keywords(article: &Article) -> HashSet<String> {
    article
        .keywords
        .iter()
        .map(|entry| entry.keyword.to_lowercase())
        .collect()
}

fn overlap(
    topic_keywords: &HashSet<String>,
    article_keywords: &HashSet<String>,
) -> BTreeSet<String> {
    topic_keywords
        .intersection(article_keywords)
        .cloned()
        .collect()
}

/// Pick the article whose keyword list shares the most words with the topic's
/// keyword set. Ties go to the earliest article in store order; only a
/// strictly higher score replaces the current best. Externally supplied
/// keyword scores never influence the ranking.
pub fn find_best_article(
    topic_keywords: &HashSet<String>,
    articles: &IndexMap<i32, Article>,
) -> Option<i32> {
    let mut best: Option<(i32, usize)> = None;

    for (article_id, article) in articles {
        let matching = overlap(topic_keywords, &lowercased_keywords(article));
        if matching.is_empty() {
            continue;
        }

        match best {
            Some((_, best_score)) if best_score >= matching.len() => {}
            _ => best = Some((*article_id, matching.len())),
        }
    }

    if let Some((article_id, score)) = best {
        info!("best article {} for keyword set (score {})", article_id, score);
    }

    best.map(|(article_id, _)| article_id)
}

/// For every topic, in topic store order, record its best article together
/// with the shared keywords. Topics without any overlapping article are
/// omitted entirely rather than reported with a zero score.
pub fn match_all_topics(
    topics: &IndexMap<String, Topic>,
    articles: &IndexMap<i32, Article>,
) -> IndexMap<String, TopicMatch> {
    let mut matches = IndexMap::new();

    for (topic_id, topic) in topics {
        let Some(article_id) = find_best_article(&topic.keywords, articles) else {
            continue;
        };
        let Some(article) = articles.get(&article_id) else {
            continue;
        };

        let matching = overlap(&topic.keywords, &lowercased_keywords(article));
        if matching.is_empty() {
            continue;
        }

        matches.insert(
            topic_id.clone(),
            TopicMatch {
                article_id: Some(article_id),
                score: matching.len(),
                matching_keywords: matching,
            },
        );
    }

    matches
}

/// Score one article against every topic. The result is ordered by
/// descending score; the sort is stable, so equally scored topics keep their
/// store order. An unknown article id yields an empty mapping.
pub fn match_one_article(
    article_id: i32,
    topics: &IndexMap<String, Topic>,
    articles: &IndexMap<i32, Article>,
) -> IndexMap<String, TopicMatch> {
    let Some(article) = articles.get(&article_id) else {
        warn!("article {} not found in the article store", article_id);
        return IndexMap::new();
    };

    let article_keywords = lowercased_keywords(article);
    let mut matches: Vec<(String, TopicMatch)> = Vec::new();

    for (topic_id, topic) in topics {
        let matching = overlap(&topic.keywords, &article_keywords);
        if matching.is_empty() {
            continue;
        }

        matches.push((
            topic_id.clone(),
            TopicMatch {
                article_id: None,
                score: matching.len(),
                matching_keywords: matching,
            },
        ));
    }

    matches.sort_by(|a, b| b.1.score.cmp(&a.1.score));
    matches.into_iter().collect()
}
