use futures::TryStreamExt;
use sqlx::{Error, PgPool};

use crate::models::{ArticleKeywordJoinRow, ArticleRow};

pub async fn check_article_exists(db: &PgPool, article_id: i32) -> Result<bool, Error> {
    let num_articles: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM articles
        WHERE article_id = $1
        "#,
    )
    .bind(article_id)
    .fetch_one(db)
    .await?;

    Ok(num_articles >= 1)
}

pub async fn insert_article(
    db: &PgPool,
    article_id: i32,
    title: &str,
    content: &str,
) -> Result<ArticleRow, Error> {
    sqlx::query_as(
        r#"
        INSERT INTO articles (article_id, title, content)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(article_id)
    .bind(title)
    .bind(content)
    .fetch_one(db)
    .await
}

pub async fn get_all_articles_with_keywords(
    db: &PgPool,
) -> Result<Vec<ArticleKeywordJoinRow>, Error> {
    let stream = sqlx::query_as(
        r#"
        SELECT a.article_id, a.title, a.content, k.keyword, k.score
        FROM articles a
        LEFT JOIN keywords k ON a.article_id = k.article_id
        ORDER BY a.id, k.id
        "#,
    )
    .fetch(db);

    stream.try_collect::<Vec<_>>().await
}
