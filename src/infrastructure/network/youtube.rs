use crate::domain::error::CraftyError;
use crate::domain::traits::YouTubeApi;
use crate::domain::wire::{YouTubeSearchResponse, YouTubeVideosResponse};
use crate::infrastructure::config::YouTubeConfig;
use crate::infrastructure::network::http::{read_json, require};
use async_trait::async_trait;
use reqwest::Client;

const API: &str = "youtube";

/// YouTube Data API v3 client
pub struct YouTubeClient {
    client: Client,
    config: YouTubeConfig,
}

impl YouTubeClient {
    pub fn new(client: Client, config: YouTubeConfig) -> Self {
        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn search(&self, params: &[(&str, String)]) -> Result<YouTubeSearchResponse, CraftyError> {
        let key = require(&self.config.api_key, "YouTube API key")?;
        let response = self
            .client
            .get(self.url("search"))
            .query(&[("key", key), ("part", "id"), ("type", "video")])
            .query(params)
            .send()
            .await?;
        read_json(API, response).await
    }
}

#[async_trait]
impl YouTubeApi for YouTubeClient {
    async fn search_by_location(
        &self,
        lat: f64,
        lng: f64,
        radius: &str,
        max_results: u32,
    ) -> Result<YouTubeSearchResponse, CraftyError> {
        self.search(&[
            ("location", format!("{},{}", lat, lng)),
            ("locationRadius", radius.to_string()),
            ("order", "viewCount".to_string()),
            ("maxResults", max_results.to_string()),
        ])
        .await
    }

    async fn search_by_keyword(
        &self,
        keyword: &str,
        max_results: u32,
    ) -> Result<YouTubeSearchResponse, CraftyError> {
        self.search(&[
            ("q", keyword.to_string()),
            ("order", "viewCount".to_string()),
            ("regionCode", "KR".to_string()),
            ("maxResults", max_results.to_string()),
        ])
        .await
    }

    async fn videos(&self, ids: &[String]) -> Result<YouTubeVideosResponse, CraftyError> {
        if ids.is_empty() {
            return Ok(YouTubeVideosResponse::default());
        }
        let key = require(&self.config.api_key, "YouTube API key")?;
        let joined = ids.join(",");
        let response = self
            .client
            .get(self.url("videos"))
            .query(&[
                ("key", key),
                ("part", "snippet,statistics"),
                ("id", joined.as_str()),
            ])
            .send()
            .await?;
        read_json(API, response).await
    }
}
