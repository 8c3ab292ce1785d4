use sqlx::{Error, PgPool};

use crate::models::ArticleKeyword;

pub async fn insert_keywords(
    db: &PgPool,
    article_id: i32,
    keywords: &[ArticleKeyword],
) -> Result<(), Error> {
    for entry in keywords {
        sqlx::query(
            r#"
            INSERT INTO keywords (article_id, keyword, score)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(article_id)
        .bind(&entry.keyword)
        .bind(entry.score)
        .execute(db)
        .await?;
    }

    Ok(())
}
