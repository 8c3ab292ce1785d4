// End-to-end flow over the shipped roadmap sample: extract topics from the
// HTML file, match them against the mock article, and inject the resulting
// link back into the document.

use roadmap_analyzer::services::articles::{ArticleStore, MOCK_ARTICLE_ID};
use roadmap_analyzer::services::matching::{match_all_topics, match_one_article};
use roadmap_analyzer::services::roadmap_rewrite::inject_article_links;
use roadmap_analyzer::services::topics::TopicStore;

const ROADMAP_HTML: &str = include_str!("../frontend/index.html");

fn roadmap_file() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("index.html");
    std::fs::write(&path, ROADMAP_HTML).expect("write roadmap");
    (dir, path)
}

#[test]
fn extracts_every_stage_of_the_sample_roadmap() {
    let (_dir, path) = roadmap_file();

    let mut topics = TopicStore::new();
    topics.refresh_from_file(&path);

    let ids: Vec<&String> = topics.topics().keys().collect();
    assert_eq!(ids, ["stage1", "stage2", "stage3"]);
    assert_eq!(topics.topics()["stage1"].title, "Основы Python");
}

#[test]
fn mock_article_matches_the_threading_stage_only() {
    let mut topics = TopicStore::new();
    topics.refresh_from_html(ROADMAP_HTML);

    let mut articles = ArticleStore::new();
    articles.insert_mock();

    let matches = match_all_topics(topics.topics(), articles.articles());

    assert_eq!(matches.len(), 1);
    let stage_match = &matches["stage2"];
    assert_eq!(stage_match.article_id, Some(MOCK_ARTICLE_ID));
    assert_eq!(stage_match.score, 2);
    assert!(stage_match.matching_keywords.contains("многопоточность"));
    assert!(stage_match.matching_keywords.contains("синхронизация"));
}

#[test]
fn one_article_matches_are_serialized_without_an_article_id() {
    let mut topics = TopicStore::new();
    topics.refresh_from_html(ROADMAP_HTML);

    let mut articles = ArticleStore::new();
    articles.insert_mock();

    let matches = match_one_article(MOCK_ARTICLE_ID, topics.topics(), articles.articles());
    assert_eq!(matches.len(), 1);

    let json = serde_json::to_value(&matches).expect("serialize matches");
    let stage_match = &json["stage2"];
    assert!(stage_match.get("article_id").is_none());
    assert_eq!(stage_match["score"], 2);
    assert_eq!(
        stage_match["matching_keywords"],
        serde_json::json!(["многопоточность", "синхронизация"])
    );
}

#[test]
fn matched_links_survive_the_file_round_trip() {
    let (_dir, path) = roadmap_file();

    let mut topics = TopicStore::new();
    topics.refresh_from_file(&path);

    let mut articles = ArticleStore::new();
    articles.insert_mock();

    let matches = match_all_topics(topics.topics(), articles.articles());
    let html = std::fs::read_to_string(&path).expect("read roadmap");
    let rewritten = inject_article_links(&html, &matches, &articles).expect("inject links");
    std::fs::write(&path, &rewritten).expect("write roadmap");

    let updated = std::fs::read_to_string(&path).expect("re-read roadmap");
    assert!(updated.contains(r##"href="#article-1""##));
    assert!(updated.contains("C++: Многопоточное программирование (совпадение: 2)"));
    // only the matched stage gains a link
    assert_eq!(updated.matches("article-link").count(), 1);
}

#[test]
fn refresh_from_a_missing_file_empties_the_store() {
    let (dir, path) = roadmap_file();

    let mut topics = TopicStore::new();
    topics.refresh_from_file(&path);
    assert_eq!(topics.len(), 3);

    drop(dir);
    topics.refresh_from_file(&path);
    assert!(topics.is_empty());
    assert!(match_all_topics(topics.topics(), ArticleStore::new().articles()).is_empty());
}
