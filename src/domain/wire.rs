// Raw response shapes of the third-party APIs. Only the fields we read are declared.
use serde::{Deserialize, Serialize};

// Naver Search: news.json
#[derive(Deserialize, Debug, Clone, Default)]
pub struct NaverNewsResponse {
    #[serde(default)]
    pub items: Vec<NaverNewsItem>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct NaverNewsItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub originallink: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
}

// Naver DataLab (search and shopping insight share this envelope)
#[derive(Deserialize, Debug, Clone, Default)]
pub struct DataLabResponse {
    #[serde(default)]
    pub results: Vec<DataLabResult>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct DataLabResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub data: Vec<DataLabPoint>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct DataLabPoint {
    pub period: String,
    pub ratio: Option<f64>,
    pub value: Option<f64>,
    pub group: Option<String>,
}

/// Request body for `datalab/search`.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DataLabSearchRequest {
    pub start_date: String,
    pub end_date: String,
    pub time_unit: String,
    pub keyword_groups: Vec<KeywordGroup>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct KeywordGroup {
    pub group_name: String,
    pub keywords: Vec<String>,
}

/// Request body for the shopping insight keyword endpoints.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingInsightRequest {
    pub start_date: String,
    pub end_date: String,
    pub time_unit: String,
    pub category: String,
    pub keyword: ShoppingKeywordParam,
}

#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
pub enum ShoppingKeywordParam {
    /// `category/keyword/{gender,age}` take a single keyword string.
    Single(String),
    /// `category/keywords` takes named keyword groups.
    Groups(Vec<ShoppingKeywordGroup>),
}

#[derive(Serialize, Debug, Clone)]
pub struct ShoppingKeywordGroup {
    pub name: String,
    pub param: Vec<String>,
}

// YouTube Data API v3
#[derive(Deserialize, Debug, Clone, Default)]
pub struct YouTubeSearchResponse {
    #[serde(default)]
    pub items: Vec<YouTubeSearchItem>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct YouTubeSearchItem {
    #[serde(default)]
    pub id: YouTubeSearchId,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeSearchId {
    pub video_id: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct YouTubeVideosResponse {
    #[serde(default)]
    pub items: Vec<YouTubeVideo>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct YouTubeVideo {
    #[serde(default)]
    pub id: String,
    pub snippet: Option<YouTubeSnippet>,
    pub statistics: Option<YouTubeStatistics>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeSnippet {
    pub title: Option<String>,
    pub channel_title: Option<String>,
    pub published_at: Option<String>,
    #[serde(default)]
    pub thumbnails: YouTubeThumbnails,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct YouTubeThumbnails {
    pub high: Option<YouTubeThumbnail>,
    pub medium: Option<YouTubeThumbnail>,
    pub default: Option<YouTubeThumbnail>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct YouTubeThumbnail {
    pub url: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeStatistics {
    pub view_count: Option<String>,
}

// Kakao Local: coord2address
#[derive(Deserialize, Debug, Clone, Default)]
pub struct KakaoCoordResponse {
    #[serde(default)]
    pub documents: Vec<KakaoDocument>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct KakaoDocument {
    pub address: Option<KakaoAddress>,
    pub road_address: Option<KakaoAddress>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct KakaoAddress {
    #[serde(default)]
    pub region_1depth_name: String,
}

// Google Custom Search
#[derive(Deserialize, Debug, Clone, Default)]
pub struct GoogleSearchResponse {
    #[serde(default)]
    pub items: Vec<GoogleSearchItem>,
    #[serde(default)]
    pub queries: GoogleQueries,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoogleSearchItem {
    pub cache_id: Option<String>,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub title: String,
    pub image: Option<GoogleImageMeta>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoogleImageMeta {
    pub context_link: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoogleQueries {
    #[serde(default)]
    pub next_page: Vec<GooglePageRef>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GooglePageRef {
    pub start_index: Option<u32>,
}

// Pexels
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PexelsSearchResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub photos: Vec<PexelsPhoto>,
    pub next_page: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PexelsPhoto {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    pub alt: Option<String>,
    #[serde(default)]
    pub src: PexelsSrc,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PexelsSrc {
    #[serde(default)]
    pub large: String,
    #[serde(default)]
    pub original: String,
}
