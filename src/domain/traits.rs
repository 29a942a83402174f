use crate::domain::cache::{CacheEntry, Collection};
use crate::domain::error::CraftyError;
use crate::domain::wire::{
    DataLabResponse, DataLabSearchRequest, GoogleSearchResponse, KakaoCoordResponse,
    NaverNewsResponse, PexelsSearchResponse, ShoppingInsightRequest, YouTubeSearchResponse,
    YouTubeVideosResponse,
};
use async_trait::async_trait;

/// Document store holding one entry per (collection, key).
///
/// Writes replace the whole entry. Implementations need not be transactional.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, collection: Collection, key: &str)
        -> Result<Option<CacheEntry>, CraftyError>;

    async fn put(&self, collection: Collection, entry: CacheEntry) -> Result<(), CraftyError>;

    async fn count(&self, collection: Collection) -> Result<usize, CraftyError>;

    /// Delete entries written before `cutoff_ms`. Returns how many went away.
    async fn prune_older_than(&self, cutoff_ms: i64) -> Result<usize, CraftyError>;
}

/// Wall clock in unix milliseconds.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

#[async_trait]
pub trait NaverApi: Send + Sync {
    async fn search_news(&self, query: &str, display: u32)
        -> Result<NaverNewsResponse, CraftyError>;

    async fn keyword_trend(&self, req: &DataLabSearchRequest)
        -> Result<DataLabResponse, CraftyError>;

    async fn shopping_gender(&self, req: &ShoppingInsightRequest)
        -> Result<DataLabResponse, CraftyError>;

    async fn shopping_age(&self, req: &ShoppingInsightRequest)
        -> Result<DataLabResponse, CraftyError>;

    async fn shopping_keywords(&self, req: &ShoppingInsightRequest)
        -> Result<DataLabResponse, CraftyError>;
}

#[async_trait]
pub trait YouTubeApi: Send + Sync {
    /// `search.list` restricted to videos around a point.
    async fn search_by_location(
        &self,
        lat: f64,
        lng: f64,
        radius: &str,
        max_results: u32,
    ) -> Result<YouTubeSearchResponse, CraftyError>;

    async fn search_by_keyword(
        &self,
        keyword: &str,
        max_results: u32,
    ) -> Result<YouTubeSearchResponse, CraftyError>;

    /// `videos.list` with snippet and statistics parts.
    async fn videos(&self, ids: &[String]) -> Result<YouTubeVideosResponse, CraftyError>;
}

#[async_trait]
pub trait GeocodeApi: Send + Sync {
    async fn coord_to_address(&self, lat: f64, lng: f64)
        -> Result<KakaoCoordResponse, CraftyError>;
}

#[async_trait]
pub trait ImageSearchApi: Send + Sync {
    async fn search_images(&self, query: &str, start: u32)
        -> Result<GoogleSearchResponse, CraftyError>;
}

#[async_trait]
pub trait StockPhotoApi: Send + Sync {
    async fn search_photos(&self, query: &str, page: u32)
        -> Result<PexelsSearchResponse, CraftyError>;
}
