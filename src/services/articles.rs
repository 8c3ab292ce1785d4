use indexmap::IndexMap;

use crate::models::{Article, ArticleKeyword, ArticleKeywordJoinRow};

pub const MOCK_ARTICLE_ID: i32 = 1;

/// Process-wide cache of known articles, keyed by article id in insertion
/// order. The matcher's tie-break contract leans on that order staying
/// stable across loads.
#[derive(Default)]
pub struct ArticleStore {
    articles: IndexMap<i32, Article>,
}

impl ArticleStore {
    pub fn new() -> Self {
        ArticleStore {
            articles: IndexMap::new(),
        }
    }

    pub fn articles(&self) -> &IndexMap<i32, Article> {
        &self.articles
    }

    pub fn get(&self, article_id: i32) -> Option<&Article> {
        self.articles.get(&article_id)
    }

    pub fn first(&self) -> Option<&Article> {
        self.articles.values().next()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn insert(&mut self, article: Article) {
        self.articles.insert(article.id, article);
    }

    /// Merge freshly loaded articles into the store. Existing ids are
    /// replaced in place and keep their original position.
    pub fn extend(&mut self, articles: impl IntoIterator<Item = Article>) {
        for article in articles {
            self.insert(article);
        }
    }

    pub fn insert_mock(&mut self) -> i32 {
        let article = mock_article();
        let article_id = article.id;
        self.insert(article);
        article_id
    }
}

/// The fixed demo article used when no scraped corpus is requested. Content
/// and keyword scores are hardcoded; nothing here touches the database or
/// the encoder.
pub fn mock_article() -> Article {
    Article {
        id: MOCK_ARTICLE_ID,
        title: "C++: Многопоточное программирование".to_string(),
        content: "C++ предоставляет мощные инструменты для разработки многопоточных приложений.\n\
                  Стандартная библиотека C++11 и выше включает классы std::thread, std::mutex, std::condition_variable \n\
                  и другие примитивы синхронизации, которые позволяют эффективно создавать параллельные программы."
            .to_string(),
        keywords: vec![
            keyword("C++", 10),
            keyword("многопоточность", 8),
            keyword("std::thread", 7),
            keyword("std::mutex", 6),
            keyword("синхронизация", 5),
        ],
    }
}

fn keyword(keyword: &str, score: i32) -> ArticleKeyword {
    ArticleKeyword {
        keyword: keyword.to_string(),
        score,
    }
}

/// Fold the articles/keywords join back into whole articles, preserving row
/// order (the query orders by article insertion id).
pub fn articles_from_rows(rows: Vec<ArticleKeywordJoinRow>) -> Vec<Article> {
    let mut articles: IndexMap<i32, Article> = IndexMap::new();

    for row in rows {
        let ArticleKeywordJoinRow {
            article_id,
            title,
            content,
            keyword,
            score,
        } = row;

        let article = articles.entry(article_id).or_insert_with(|| Article {
            id: article_id,
            title,
            content,
            keywords: Vec::new(),
        });

        if let (Some(keyword), Some(score)) = (keyword, score) {
            article.keywords.push(ArticleKeyword { keyword, score });
        }
    }

    articles.into_values().collect()
}
