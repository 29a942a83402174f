//! Route handlers.
//!
//! Query parameters arrive as optional strings and are validated here so that
//! every rejection carries the JSON error body.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{dashboard, datalab, images, news, videos};
use crate::domain::error::CraftyError;
use crate::domain::model::{
    Dashboard, GenderAgeInsight, ImagePage, NewsArticle, Outcome, TopVideos, TrendPoint,
    VideoItem,
};
use crate::interfaces::http::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

fn required(value: Option<String>, name: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(format!("{} is required", name)))
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number<N: std::str::FromStr>(value: &str, name: &str) -> Result<N> {
    value
        .parse()
        .map_err(|_| ApiError::bad_request(format!("{} must be a number (got {:?})", name, value)))
}

/// Upstream failures become the empty value; missing credentials still surface.
fn ui_payload<T: Default>(outcome: Outcome<T>) -> Result<T> {
    match outcome {
        Outcome::Failed(e @ CraftyError::Config(_)) => Err(e.into()),
        other => Ok(other.into_payload_or_default()),
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Debug, Deserialize)]
pub struct TopVideosParams {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub radius: Option<String>,
    pub city: Option<String>,
}

/// GET /getTopVideos
pub async fn get_top_videos(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopVideosParams>,
) -> Result<Json<TopVideos>> {
    let lat: f64 = parse_number(&required(params.lat, "lat")?, "lat")?;
    let lng: f64 = parse_number(&required(params.lng, "lng")?, "lng")?;
    let radius = required(params.radius, "radius")?;
    let area = videos::VideoArea::new(lat, lng, &radius)?;
    let city = optional(params.city);

    let top = videos::top_videos(
        &state.cache,
        state.services.geocode.as_ref(),
        state.services.youtube.as_ref(),
        &area,
        city.as_deref(),
        state.config.youtube.max_results,
    )
    .await?;

    debug!(city = %top.city, cached = top.cached, items = top.items.len(), "top videos");
    Ok(Json(top))
}

#[derive(Debug, Deserialize)]
pub struct KeywordParams {
    pub keyword: Option<String>,
}

/// GET /getKeywordVideos
pub async fn get_keyword_videos(
    State(state): State<Arc<AppState>>,
    Query(params): Query<KeywordParams>,
) -> Result<Json<Vec<VideoItem>>> {
    let keyword = required(params.keyword, "keyword")?;
    let outcome = videos::keyword_videos(
        &state.cache,
        state.services.youtube.as_ref(),
        &keyword,
        state.config.youtube.max_results,
    )
    .await;
    Ok(Json(ui_payload(outcome)?))
}

#[derive(Debug, Deserialize)]
pub struct GoogleImagesParams {
    pub query: Option<String>,
    pub start: Option<String>,
}

/// GET /getGoogleImages
pub async fn get_google_images(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GoogleImagesParams>,
) -> Result<Json<ImagePage>> {
    let query = required(params.query, "query")?;
    let start = match optional(params.start) {
        Some(s) => parse_number(&s, "start")?,
        None => 1,
    };
    let outcome = images::google_images(state.services.images.as_ref(), &query, start).await;
    Ok(Json(ui_payload(outcome)?))
}

#[derive(Debug, Deserialize)]
pub struct PexelsParams {
    pub query: Option<String>,
    pub page: Option<String>,
}

/// GET /getPexelsPhotos
pub async fn get_pexels_photos(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PexelsParams>,
) -> Result<Json<ImagePage>> {
    let query = required(params.query, "query")?;
    let page = match optional(params.page) {
        Some(p) => parse_number(&p, "page")?,
        None => 1,
    };
    let outcome =
        images::pexels_photos(state.services.stock_photos.as_ref(), &query, page).await;
    Ok(Json(ui_payload(outcome)?))
}

#[derive(Debug, Deserialize)]
pub struct NewsParams {
    pub query: Option<String>,
}

/// GET /getNaverNews
pub async fn get_naver_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NewsParams>,
) -> Result<Json<Vec<NewsArticle>>> {
    let query = required(params.query, "query")?;
    let outcome = news::naver_news(&state.cache, state.services.naver.as_ref(), &query).await;
    Ok(Json(ui_payload(outcome)?))
}

#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub keyword: Option<String>,
    pub category: Option<String>,
}

impl CategoryParams {
    fn resolve(self, state: &AppState) -> Result<(String, String)> {
        let keyword = required(self.keyword, "keyword")?;
        let category =
            optional(self.category).unwrap_or_else(|| state.config.naver.default_category.clone());
        Ok((keyword, category))
    }
}

/// GET /getGenderAgeTrend
pub async fn get_gender_age_trend(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryParams>,
) -> Result<Json<GenderAgeInsight>> {
    let (keyword, category) = params.resolve(&state)?;
    let outcome = datalab::gender_age_trend(
        &state.cache,
        state.services.naver.as_ref(),
        &keyword,
        &category,
    )
    .await;
    Ok(Json(ui_payload(outcome)?))
}

/// GET /getSeasonalPattern
pub async fn get_seasonal_pattern(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryParams>,
) -> Result<Json<Vec<TrendPoint>>> {
    let (keyword, category) = params.resolve(&state)?;
    let outcome = datalab::seasonal_pattern(
        &state.cache,
        state.services.naver.as_ref(),
        &keyword,
        &category,
    )
    .await;
    Ok(Json(ui_payload(outcome)?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordTrendParams {
    pub keyword: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub time_unit: Option<String>,
}

/// GET /getKeywordTrend
pub async fn get_keyword_trend(
    State(state): State<Arc<AppState>>,
    Query(params): Query<KeywordTrendParams>,
) -> Result<Json<Vec<TrendPoint>>> {
    let keyword = required(params.keyword, "keyword")?;
    let start = optional(params.start_date);
    let end = optional(params.end_date);
    let unit = optional(params.time_unit);
    let range = datalab::TrendRange::parse(
        state.cache.now_ms(),
        start.as_deref(),
        end.as_deref(),
        unit.as_deref(),
    )?;
    let outcome =
        datalab::keyword_trend(&state.cache, state.services.naver.as_ref(), &keyword, &range)
            .await;
    Ok(Json(ui_payload(outcome)?))
}

/// GET /getDashboard
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<KeywordParams>,
) -> Result<Json<Dashboard>> {
    let keyword = required(params.keyword, "keyword")?;
    let view = dashboard::dashboard(
        &state.cache,
        state.services.naver.as_ref(),
        state.services.youtube.as_ref(),
        &keyword,
        state.config.youtube.max_results,
    )
    .await?;
    Ok(Json(view))
}
