use crate::domain::error::CraftyError;
use crate::domain::traits::NaverApi;
use crate::domain::wire::{
    DataLabResponse, DataLabSearchRequest, NaverNewsResponse, ShoppingInsightRequest,
};
use crate::infrastructure::config::NaverConfig;
use crate::infrastructure::network::http::{read_json, require};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use tracing::debug;

const API: &str = "naver";

/// Naver Search and DataLab client. Auth goes in the client id/secret headers.
pub struct NaverClient {
    client: Client,
    config: NaverConfig,
}

impl NaverClient {
    pub fn new(client: Client, config: NaverConfig) -> Self {
        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authed(&self, builder: RequestBuilder) -> Result<RequestBuilder, CraftyError> {
        let id = require(&self.config.client_id, "Naver client id")?;
        let secret = require(&self.config.client_secret, "Naver client secret")?;
        Ok(builder
            .header("X-Naver-Client-Id", id)
            .header("X-Naver-Client-Secret", secret))
    }

    async fn post_datalab<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<DataLabResponse, CraftyError> {
        let request = self.authed(self.client.post(self.url(path)))?;
        debug!(path, "naver datalab request");
        let response = request.json(body).send().await?;
        read_json(API, response).await
    }
}

#[async_trait]
impl NaverApi for NaverClient {
    async fn search_news(
        &self,
        query: &str,
        display: u32,
    ) -> Result<NaverNewsResponse, CraftyError> {
        let display = display.to_string();
        let request = self
            .authed(self.client.get(self.url("v1/search/news.json")))?
            .query(&[("query", query), ("display", display.as_str()), ("sort", "sim")]);
        let response = request.send().await?;
        read_json(API, response).await
    }

    async fn keyword_trend(
        &self,
        req: &DataLabSearchRequest,
    ) -> Result<DataLabResponse, CraftyError> {
        self.post_datalab("v1/datalab/search", req).await
    }

    async fn shopping_gender(
        &self,
        req: &ShoppingInsightRequest,
    ) -> Result<DataLabResponse, CraftyError> {
        self.post_datalab("v1/datalab/shopping/category/keyword/gender", req)
            .await
    }

    async fn shopping_age(
        &self,
        req: &ShoppingInsightRequest,
    ) -> Result<DataLabResponse, CraftyError> {
        self.post_datalab("v1/datalab/shopping/category/keyword/age", req)
            .await
    }

    async fn shopping_keywords(
        &self,
        req: &ShoppingInsightRequest,
    ) -> Result<DataLabResponse, CraftyError> {
        self.post_datalab("v1/datalab/shopping/category/keywords", req)
            .await
    }
}
