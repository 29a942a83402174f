// Raw upstream JSON -> records the frontend expects. Every function here is pure.
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use super::model::{
    GenderAgeInsight, GroupShare, ImagePage, ImagePhoto, NewsArticle, TrendPoint, VideoItem,
};
use super::wire::{
    DataLabResponse, GoogleSearchResponse, KakaoCoordResponse, NaverNewsResponse,
    PexelsSearchResponse, YouTubeVideosResponse,
};

pub const UNTITLED_VIDEO: &str = "제목 없음";
pub const UNKNOWN_CHANNEL: &str = "채널 정보 없음";
pub const UNKNOWN_CITY: &str = "Unknown";

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("static regex"));

/// Remove anything that looks like an HTML tag.
pub fn remove_html_tags(text: &str) -> String {
    HTML_TAG.replace_all(text, "").into_owned()
}

fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

// Naver escapes quotes in news titles; tags go first so decoded `<` can't form new ones.
fn clean_news_text(text: &str) -> String {
    decode_entities(&remove_html_tags(text)).trim().to_string()
}

pub fn news_articles(raw: NaverNewsResponse) -> Vec<NewsArticle> {
    raw.items
        .into_iter()
        .map(|item| {
            let url = if item.originallink.is_empty() {
                item.link
            } else {
                item.originallink
            };
            NewsArticle {
                title: clean_news_text(&item.title),
                url,
                summary: clean_news_text(&item.description),
            }
        })
        .collect()
}

pub fn videos(raw: YouTubeVideosResponse) -> Vec<VideoItem> {
    raw.items
        .into_iter()
        .map(|video| {
            let snippet = video.snippet.unwrap_or_default();
            let thumbs = snippet.thumbnails;
            let thumbnail = thumbs
                .high
                .or(thumbs.medium)
                .or(thumbs.default)
                .map(|t| t.url);
            VideoItem {
                id: video.id,
                title: snippet
                    .title
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| UNTITLED_VIDEO.to_string()),
                channel_title: snippet
                    .channel_title
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| UNKNOWN_CHANNEL.to_string()),
                thumbnail,
                view_count: video
                    .statistics
                    .and_then(|s| s.view_count)
                    .unwrap_or_else(|| "0".to_string()),
                published_at: snippet.published_at,
            }
        })
        .collect()
}

/// First series of a DataLab response as `{date, value}` points.
pub fn trend_points(raw: DataLabResponse) -> Vec<TrendPoint> {
    raw.results
        .into_iter()
        .next()
        .map(|series| {
            series
                .data
                .into_iter()
                .map(|p| TrendPoint {
                    date: p.period,
                    value: p.ratio.or(p.value).unwrap_or(0.0),
                })
                .collect()
        })
        .unwrap_or_default()
}

// Average ratio per group across all periods, ordered by group code.
fn group_shares(raw: DataLabResponse) -> Vec<GroupShare> {
    let mut sums: BTreeMap<String, (f64, u32)> = BTreeMap::new();
    for point in raw.results.into_iter().flat_map(|r| r.data) {
        let Some(group) = point.group else { continue };
        let entry = sums.entry(group).or_insert((0.0, 0));
        entry.0 += point.ratio.or(point.value).unwrap_or(0.0);
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(group, (sum, n))| GroupShare {
            group,
            value: if n == 0 { 0.0 } else { sum / n as f64 },
        })
        .collect()
}

pub fn gender_age(gender: DataLabResponse, age: DataLabResponse) -> GenderAgeInsight {
    GenderAgeInsight {
        gender_groups: group_shares(gender),
        age_groups: group_shares(age),
    }
}

pub fn city_name(raw: KakaoCoordResponse) -> String {
    raw.documents
        .into_iter()
        .next()
        .and_then(|doc| doc.address.or(doc.road_address))
        .map(|a| a.region_1depth_name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_CITY.to_string())
}

pub fn google_images(raw: GoogleSearchResponse) -> ImagePage {
    let photos = raw
        .items
        .into_iter()
        .map(|item| {
            let id = item
                .cache_id
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| format!("{}-{}", item.link, uuid::Uuid::new_v4().simple()));
            ImagePhoto {
                id,
                url: item
                    .image
                    .and_then(|i| i.context_link)
                    .unwrap_or_else(|| item.link.clone()),
                image_url: item.link,
                title: item.title,
            }
        })
        .collect();
    ImagePage {
        photos,
        next_page: raw.queries.next_page.first().and_then(|p| p.start_index),
    }
}

pub fn pexels_photos(raw: PexelsSearchResponse) -> ImagePage {
    let next_page = raw.next_page.as_ref().map(|_| raw.page + 1);
    let photos = raw
        .photos
        .into_iter()
        .map(|p| ImagePhoto {
            id: p.id.to_string(),
            url: p.url,
            image_url: if p.src.large.is_empty() {
                p.src.original
            } else {
                p.src.large
            },
            title: p.alt.unwrap_or_default(),
        })
        .collect();
    ImagePage { photos, next_page }
}
