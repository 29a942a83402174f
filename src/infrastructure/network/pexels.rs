use crate::domain::error::CraftyError;
use crate::domain::traits::StockPhotoApi;
use crate::domain::wire::PexelsSearchResponse;
use crate::infrastructure::config::PexelsConfig;
use crate::infrastructure::network::http::{read_json, require};
use async_trait::async_trait;
use reqwest::Client;

pub struct PexelsClient {
    client: Client,
    config: PexelsConfig,
}

impl PexelsClient {
    pub fn new(client: Client, config: PexelsConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl StockPhotoApi for PexelsClient {
    async fn search_photos(
        &self,
        query: &str,
        page: u32,
    ) -> Result<PexelsSearchResponse, CraftyError> {
        let key = require(&self.config.api_key, "Pexels API key")?;
        let page = page.to_string();
        let url = format!("{}/v1/search", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(url)
            .header("Authorization", key)
            .query(&[("query", query), ("page", page.as_str()), ("per_page", "15")])
            .send()
            .await?;
        read_json("pexels", response).await
    }
}
