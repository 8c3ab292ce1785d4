use std::path::Path;

use indexmap::IndexMap;
use scraper::{ElementRef, Html, Selector};
use tracing::{error, info};

use crate::models::Topic;

/// Process-wide cache of roadmap topics. Populated on demand from the
/// roadmap HTML and reused until the next explicit refresh; a failed refresh
/// leaves the store empty so callers see "no topics" instead of an error.
#[derive(Default)]
pub struct TopicStore {
    topics: IndexMap<String, Topic>,
}

impl TopicStore {
    pub fn new() -> Self {
        TopicStore {
            topics: IndexMap::new(),
        }
    }

    pub fn topics(&self) -> &IndexMap<String, Topic> {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn refresh_from_file(&mut self, path: &Path) {
        match std::fs::read_to_string(path) {
            Ok(html) => self.refresh_from_html(&html),
            Err(e) => {
                error!("failed to read roadmap file {}: {}", path.display(), e);
                self.topics.clear();
            }
        }
    }

    pub fn refresh_from_html(&mut self, html: &str) {
        self.topics = extract_topics(html);
        info!("extracted {} topics from the roadmap", self.topics.len());
    }
}

/// Pull `(id, title, subtopics)` out of every roadmap stage, in document
/// order. A stage is a `div.stage` with an `h3` title; its subtopics are the
/// direct `li` children of the first list inside the stage (nested lists
/// contribute text to their parent item, not extra subtopics).
pub fn extract_topics(html: &str) -> IndexMap<String, Topic> {
    let document = Html::parse_document(html);
    let stage_selector = Selector::parse("div.stage").unwrap();
    let title_selector = Selector::parse("h3").unwrap();
    let list_selector = Selector::parse("ul").unwrap();

    let mut topics = IndexMap::new();
    for stage in document.select(&stage_selector) {
        let topic_id = stage.value().attr("id").unwrap_or_default().to_string();
        let title = stage
            .select(&title_selector)
            .next()
            .map(element_text)
            .unwrap_or_default();
        let subtopics = stage
            .select(&list_selector)
            .next()
            .map(direct_list_items)
            .unwrap_or_default();

        topics.insert(topic_id.clone(), Topic::new(topic_id, title, subtopics));
    }

    topics
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn direct_list_items(list: ElementRef) -> Vec<String> {
    list.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li")
        .map(element_text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROADMAP: &str = r#"
        <html><body>
        <div class="stage" id="stage1">
            <h3>Основы Python</h3>
            <div class="stage-content">
                <ul>
                    <li>Синтаксис и переменные</li>
                    <li>Функции</li>
                </ul>
            </div>
        </div>
        <div class="stage" id="stage2">
            <h3>Многопоточное программирование</h3>
            <div class="stage-content">
                <ul>
                    <li>Потоки и многопоточность</li>
                    <li>Синхронизация потоков</li>
                </ul>
                <div class="resources">
                    <ul><li>Справочник</li></ul>
                </div>
            </div>
        </div>
        </body></html>
    "#;

    #[test]
    fn extracts_stages_in_document_order() {
        let topics = extract_topics(ROADMAP);

        let ids: Vec<&String> = topics.keys().collect();
        assert_eq!(ids, ["stage1", "stage2"]);

        let stage1 = &topics["stage1"];
        assert_eq!(stage1.title, "Основы Python");
        assert_eq!(stage1.subtopics, ["Синтаксис и переменные", "Функции"]);
    }

    #[test]
    fn subtopics_come_from_the_first_list_only() {
        let topics = extract_topics(ROADMAP);

        let stage2 = &topics["stage2"];
        assert_eq!(
            stage2.subtopics,
            ["Потоки и многопоточность", "Синхронизация потоков"]
        );
    }

    #[test]
    fn derives_topic_keywords_from_title_and_subtopics() {
        let topics = extract_topics(ROADMAP);

        let stage2 = &topics["stage2"];
        assert!(stage2.keywords.contains("многопоточность"));
        assert!(stage2.keywords.contains("синхронизация"));
        assert!(stage2.keywords.contains("программирование"));
    }

    #[test]
    fn nested_lists_do_not_add_subtopics() {
        let html = r#"
            <div class="stage" id="s">
                <h3>Тема</h3>
                <ul>
                    <li>Пункт
                        <ul><li>Вложенный</li></ul>
                    </li>
                </ul>
            </div>
        "#;

        let topics = extract_topics(html);
        assert_eq!(topics["s"].subtopics.len(), 1);
    }

    #[test]
    fn html_without_stages_yields_no_topics() {
        assert!(extract_topics("<html><body><p>пусто</p></body></html>").is_empty());
    }

    #[test]
    fn refresh_from_missing_file_leaves_the_store_empty() {
        let mut store = TopicStore::new();
        store.refresh_from_html(ROADMAP);
        assert_eq!(store.len(), 2);

        store.refresh_from_file(Path::new("/nonexistent/roadmap.html"));
        assert!(store.is_empty());
    }
}
