use crate::application::cache_aside::CacheAside;
use crate::domain::cache::{cache_key, Collection, VIDEO_TTL};
use crate::domain::error::CraftyError;
use crate::domain::model::{Outcome, Source, TopVideos, VideoItem};
use crate::domain::traits::{GeocodeApi, YouTubeApi};
use crate::domain::transform::{self, UNKNOWN_CITY};
use tracing::warn;

/// Where to look for popular videos.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoArea {
    pub lat: f64,
    pub lng: f64,
    /// YouTube `locationRadius`, e.g. "10km".
    pub radius: String,
}

impl VideoArea {
    /// Check coordinates and normalize the radius. A bare number means kilometres.
    pub fn new(lat: f64, lng: f64, radius: &str) -> Result<Self, CraftyError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CraftyError::InvalidInput(format!("lat out of range: {}", lat)));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CraftyError::InvalidInput(format!("lng out of range: {}", lng)));
        }
        let radius = radius.trim();
        let (number, unit) = match radius.find(|c: char| c.is_ascii_alphabetic()) {
            Some(idx) => radius.split_at(idx),
            None => (radius, "km"),
        };
        let valid_number = number.parse::<f64>().map(|n| n > 0.0).unwrap_or(false);
        if !valid_number || !["m", "km", "ft", "mi"].contains(&unit) {
            return Err(CraftyError::InvalidInput(format!(
                "radius must look like 10km, 500m, 3mi or 1000ft (got {:?})",
                radius
            )));
        }
        Ok(Self {
            lat,
            lng,
            radius: format!("{}{}", number, unit),
        })
    }
}

async fn resolve_city(geocode: &dyn GeocodeApi, area: &VideoArea) -> Option<String> {
    match geocode.coord_to_address(area.lat, area.lng).await {
        Ok(raw) => Some(transform::city_name(raw)).filter(|c| c.as_str() != UNKNOWN_CITY),
        Err(e) => {
            warn!(lat = area.lat, lng = area.lng, error = %e, "reverse geocoding failed");
            None
        }
    }
}

/// Most viewed videos around a point, cached for ten minutes per city.
///
/// The city is taken from the caller or reverse geocoded. Upstream failures
/// propagate so the HTTP layer can report the real status.
pub async fn top_videos(
    cache: &CacheAside,
    geocode: &dyn GeocodeApi,
    youtube: &dyn YouTubeApi,
    area: &VideoArea,
    city: Option<&str>,
    max_results: u32,
) -> Result<TopVideos, CraftyError> {
    let city = match city.map(str::trim).filter(|c| !c.is_empty()) {
        Some(c) => Some(c.to_string()),
        None => resolve_city(geocode, area).await,
    };

    let query = match &city {
        Some(c) => c.clone(),
        None => format!("{},{}", area.lat, area.lng),
    };
    // Without a city name, fall back to the coordinates themselves.
    let key = match &city {
        Some(c) => cache_key([c.as_str(), area.radius.as_str()]),
        None => cache_key([
            area.lat.to_string(),
            area.lng.to_string(),
            area.radius.clone(),
        ]),
    };

    let fetched = Outcome::from_fetch(
        cache
            .fetch(
                Collection::Cities,
                &key,
                &query,
                VIDEO_TTL,
                move || async move {
                    let found = youtube
                        .search_by_location(area.lat, area.lng, &area.radius, max_results)
                        .await?;
                    let ids: Vec<String> =
                        found.items.into_iter().filter_map(|i| i.id.video_id).collect();
                    youtube.videos(&ids).await
                },
                transform::videos,
            )
            .await,
    )
    .into_result()?;

    Ok(TopVideos {
        city: city.unwrap_or_else(|| UNKNOWN_CITY.to_string()),
        source: fetched.source,
        cached: fetched.source == Source::Cache,
        items: fetched.payload,
    })
}

/// Most viewed Korean videos for a keyword, cached for ten minutes.
pub async fn keyword_videos(
    cache: &CacheAside,
    youtube: &dyn YouTubeApi,
    keyword: &str,
    max_results: u32,
) -> Outcome<Vec<VideoItem>> {
    let key = cache_key([keyword]);
    Outcome::from_fetch(
        cache
            .fetch(
                Collection::KeywordVideos,
                &key,
                keyword,
                VIDEO_TTL,
                move || async move {
                    let found = youtube.search_by_keyword(keyword, max_results).await?;
                    let ids: Vec<String> =
                        found.items.into_iter().filter_map(|i| i.id.video_id).collect();
                    youtube.videos(&ids).await
                },
                transform::videos,
            )
            .await,
    )
}
