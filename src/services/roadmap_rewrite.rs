use anyhow::{anyhow, Error};
use indexmap::IndexMap;
use lol_html::html_content::ContentType;
use lol_html::{element, rewrite_str, RewriteStrSettings};
use tracing::{info, warn};

use crate::models::TopicMatch;
use crate::services::articles::ArticleStore;

/// Append one article link per matched stage to the stage's resources list.
/// Matches computed for a single article carry no id of their own; those
/// fall back to the first stored article, as the one-article flow fills the
/// store with exactly that article.
pub fn inject_article_links(
    html: &str,
    matches: &IndexMap<String, TopicMatch>,
    articles: &ArticleStore,
) -> Result<String, Error> {
    let mut handlers = Vec::new();

    for (stage_id, topic_match) in matches {
        if !is_selector_safe(stage_id) {
            warn!("skipping stage with unusable id {:?}", stage_id);
            continue;
        }

        let article_id = topic_match
            .article_id
            .or_else(|| articles.first().map(|article| article.id));
        let Some(article_id) = article_id else {
            continue;
        };
        let Some(article) = articles.get(article_id) else {
            continue;
        };

        let link = format!(
            r##"<li><a href="#article-{id}" class="article-link" data-article-id="{id}">{title} (совпадение: {score})</a></li>"##,
            id = article_id,
            title = escape_html(&article.title),
            score = topic_match.score,
        );
        let selector = format!("div#{} div.stage-content div.resources ul", stage_id);

        handlers.push(element!(selector, move |el| {
            el.append(&link, ContentType::Html);
            Ok(())
        }));

        info!("linking article {} into stage {}", article_id, stage_id);
    }

    if handlers.is_empty() {
        return Err(anyhow!("no usable matches to inject into the roadmap"));
    }

    let rewritten = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: handlers,
            ..RewriteStrSettings::default()
        },
    )?;

    Ok(rewritten)
}

// stage ids end up inside a CSS selector, so only plain tokens are usable
fn is_selector_safe(stage_id: &str) -> bool {
    !stage_id.is_empty()
        && stage_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    const ROADMAP: &str = r#"
        <html><body>
        <div class="stage" id="stage1">
            <h3>Основы Python</h3>
            <div class="stage-content">
                <ul><li>Синтаксис</li></ul>
                <div class="resources">
                    <ul><li>Документация</li></ul>
                </div>
            </div>
        </div>
        <div class="stage" id="stage2">
            <h3>Многопоточность</h3>
            <div class="stage-content">
                <ul><li>Потоки</li></ul>
                <div class="resources">
                    <ul><li>Справочник</li></ul>
                </div>
            </div>
        </div>
        </body></html>
    "#;

    fn store_with_mock() -> ArticleStore {
        let mut store = ArticleStore::new();
        store.insert_mock();
        store
    }

    fn single_match(stage_id: &str, article_id: Option<i32>, score: usize) -> IndexMap<String, TopicMatch> {
        let mut matches = IndexMap::new();
        matches.insert(
            stage_id.to_string(),
            TopicMatch {
                article_id,
                score,
                matching_keywords: BTreeSet::new(),
            },
        );
        matches
    }

    #[test]
    fn appends_a_link_to_the_matched_stage_resources() {
        let store = store_with_mock();
        let matches = single_match("stage2", Some(1), 2);

        let rewritten = inject_article_links(ROADMAP, &matches, &store).unwrap();

        assert!(rewritten.contains(r##"href="#article-1""##));
        assert!(rewritten.contains(r#"data-article-id="1""#));
        assert!(rewritten.contains("(совпадение: 2)"));
        // the untouched stage keeps its resources list as is
        let stage1 = &rewritten[..rewritten.find("stage2").unwrap()];
        assert!(!stage1.contains("article-link"));
    }

    #[test]
    fn matches_without_article_id_use_the_first_stored_article() {
        let store = store_with_mock();
        let matches = single_match("stage1", None, 1);

        let rewritten = inject_article_links(ROADMAP, &matches, &store).unwrap();

        assert!(rewritten.contains(r##"href="#article-1""##));
    }

    #[test]
    fn unusable_stage_ids_are_skipped() {
        let store = store_with_mock();
        let matches = single_match("bad stage!", Some(1), 1);

        assert!(inject_article_links(ROADMAP, &matches, &store).is_err());
    }

    #[test]
    fn empty_store_means_nothing_to_inject() {
        let store = ArticleStore::new();
        let matches = single_match("stage1", None, 1);

        assert!(inject_article_links(ROADMAP, &matches, &store).is_err());
    }

    #[test]
    fn article_titles_are_escaped() {
        let mut store = ArticleStore::new();
        store.insert(crate::models::Article {
            id: 2,
            title: "A < B & C".to_string(),
            content: String::new(),
            keywords: Vec::new(),
        });
        let matches = single_match("stage1", Some(2), 1);

        let rewritten = inject_article_links(ROADMAP, &matches, &store).unwrap();
        assert!(rewritten.contains("A &lt; B &amp; C"));
    }
}
