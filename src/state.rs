use crate::application::CacheAside;
use crate::domain::error::CraftyError;
use crate::domain::traits::{
    CacheStore, Clock, GeocodeApi, ImageSearchApi, NaverApi, StockPhotoApi, YouTubeApi,
};
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::{
    http::create_client, GoogleImageClient, KakaoClient, NaverClient, PexelsClient,
    YouTubeClient,
};
use crate::interfaces::http::rate_limit::FixedWindowLimiter;
use std::sync::Arc;
use std::time::Duration;

/// Upstream clients, injected so tests can swap them out.
#[derive(Clone)]
pub struct Services {
    pub naver: Arc<dyn NaverApi>,
    pub youtube: Arc<dyn YouTubeApi>,
    pub geocode: Arc<dyn GeocodeApi>,
    pub images: Arc<dyn ImageSearchApi>,
    pub stock_photos: Arc<dyn StockPhotoApi>,
}

impl Services {
    /// Real HTTP clients sharing one connection pool.
    pub fn from_config(config: &Config) -> Result<Self, CraftyError> {
        let http_client = create_client()?;
        Ok(Self {
            naver: Arc::new(NaverClient::new(http_client.clone(), config.naver.clone())),
            youtube: Arc::new(YouTubeClient::new(
                http_client.clone(),
                config.youtube.clone(),
            )),
            geocode: Arc::new(KakaoClient::new(http_client.clone(), config.kakao.clone())),
            images: Arc::new(GoogleImageClient::new(
                http_client.clone(),
                config.google.clone(),
            )),
            stock_photos: Arc::new(PexelsClient::new(http_client, config.pexels.clone())),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: CacheAside,
    pub services: Services,
    pub limiter: Arc<FixedWindowLimiter>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn CacheStore>) -> Result<Self, CraftyError> {
        let services = Services::from_config(&config)?;
        Ok(Self::with_parts(
            config,
            store,
            Arc::new(SystemClock),
            services,
        ))
    }

    pub fn with_parts(
        config: Config,
        store: Arc<dyn CacheStore>,
        clock: Arc<dyn Clock>,
        services: Services,
    ) -> Self {
        let limiter = FixedWindowLimiter::new(
            config.server.rate_limit_per_minute,
            Duration::from_secs(60),
        );
        Self {
            config: Arc::new(config),
            cache: CacheAside::new(store, clock),
            services,
            limiter: Arc::new(limiter),
        }
    }
}
