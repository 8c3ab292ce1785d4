use sqlx::{Error, PgPool};

pub async fn init_db(db: &PgPool) -> Result<(), Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS articles (
            id SERIAL PRIMARY KEY,
            article_id INT UNIQUE NOT NULL,
            title VARCHAR(500) NOT NULL,
            content TEXT NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
        )
        "#,
    )
    .execute(db)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS keywords (
            id SERIAL PRIMARY KEY,
            article_id INT NOT NULL REFERENCES articles(article_id),
            keyword VARCHAR(100) NOT NULL,
            score INT NOT NULL
        )
        "#,
    )
    .execute(db)
    .await?;

    Ok(())
}
