use crate::domain::error::CraftyError;
use crate::domain::traits::ImageSearchApi;
use crate::domain::wire::GoogleSearchResponse;
use crate::infrastructure::config::GoogleConfig;
use crate::infrastructure::network::http::{read_json, require};
use async_trait::async_trait;
use reqwest::Client;

/// Google Custom Search, image mode
pub struct GoogleImageClient {
    client: Client,
    config: GoogleConfig,
}

impl GoogleImageClient {
    pub fn new(client: Client, config: GoogleConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ImageSearchApi for GoogleImageClient {
    async fn search_images(
        &self,
        query: &str,
        start: u32,
    ) -> Result<GoogleSearchResponse, CraftyError> {
        let key = require(&self.config.api_key, "Google API key")?;
        let cx = require(&self.config.cse_id, "Google search engine id")?;
        let start = start.to_string();
        let url = format!(
            "{}/customsearch/v1",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .get(url)
            .query(&[
                ("key", key),
                ("cx", cx),
                ("q", query),
                ("searchType", "image"),
                ("num", "10"),
                ("start", start.as_str()),
            ])
            .send()
            .await?;
        read_json("google", response).await
    }
}
