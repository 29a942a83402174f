use crate::domain::error::CraftyError;
use crate::domain::traits::GeocodeApi;
use crate::domain::wire::KakaoCoordResponse;
use crate::infrastructure::config::KakaoConfig;
use crate::infrastructure::network::http::{read_json, require};
use async_trait::async_trait;
use reqwest::Client;

/// Kakao Local reverse geocoding
pub struct KakaoClient {
    client: Client,
    config: KakaoConfig,
}

impl KakaoClient {
    pub fn new(client: Client, config: KakaoConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl GeocodeApi for KakaoClient {
    async fn coord_to_address(
        &self,
        lat: f64,
        lng: f64,
    ) -> Result<KakaoCoordResponse, CraftyError> {
        let key = require(&self.config.rest_api_key, "Kakao REST API key")?;
        let url = format!(
            "{}/v2/local/geo/coord2address.json",
            self.config.base_url.trim_end_matches('/')
        );
        // Kakao takes x = longitude, y = latitude.
        let response = self
            .client
            .get(url)
            .header("Authorization", format!("KakaoAK {}", key))
            .query(&[("x", lng.to_string()), ("y", lat.to_string())])
            .send()
            .await?;
        read_json("kakao", response).await
    }
}
