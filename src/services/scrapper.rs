use anyhow::Error;
use serde::Deserialize;
use tracing::info;

/// Article payload returned by the scrapping service.
#[derive(Deserialize, Debug)]
pub struct ScrappedArticle {
    pub name: String,
    pub text: String,
}

#[derive(Clone)]
pub struct ScrapperClient {
    base_url: String,
    http: reqwest::Client,
}

impl ScrapperClient {
    pub fn new(base_url: String) -> Self {
        ScrapperClient {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub async fn fetch_article(&self, article_id: i32) -> Result<ScrappedArticle, Error> {
        let url = format!(
            "{}/api/v1/scrapping/article/{}",
            self.base_url, article_id
        );
        info!("requesting article {} from {}", article_id, url);

        let response = self.http.get(&url).send().await?.error_for_status()?;
        let article = response.json::<ScrappedArticle>().await?;
        Ok(article)
    }
}
