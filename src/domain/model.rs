use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::CraftyError;

// 뉴스 기사
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsArticle {
    pub title: String,
    pub url: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub thumbnail: Option<String>,
    pub view_count: String,
    pub published_at: Option<String>,
}

/// One point of a DataLab time series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupShare {
    pub group: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenderAgeInsight {
    pub gender_groups: Vec<GroupShare>,
    pub age_groups: Vec<GroupShare>,
}

impl GenderAgeInsight {
    pub fn is_empty(&self) -> bool {
        self.gender_groups.is_empty() && self.age_groups.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImagePhoto {
    pub id: String,
    pub url: String,
    pub image_url: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImagePage {
    pub photos: Vec<ImagePhoto>,
    pub next_page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopVideos {
    pub city: String,
    pub source: Source,
    pub cached: bool,
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dashboard {
    pub keyword: String,
    pub trend: Vec<TrendPoint>,
    pub news: Vec<NewsArticle>,
    pub videos: Vec<VideoItem>,
}

// 응답 출처
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Api,
}

/// Payload handed back by the cache-aside fetcher together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub payload: T,
    pub source: Source,
}

/// Result of a flow that talks to an upstream API.
///
/// `Empty` means the upstream answered but had nothing for the query;
/// `Failed` means the upstream (or our request to it) broke.
#[derive(Debug)]
pub enum Outcome<T> {
    Success { payload: T, source: Source },
    Empty { source: Source },
    Failed(CraftyError),
}

/// Payloads that can tell "no results" apart from "some results".
pub trait Emptiness {
    fn is_empty_payload(&self) -> bool;
}

impl<T> Emptiness for Vec<T> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiness for GenderAgeInsight {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiness for ImagePage {
    fn is_empty_payload(&self) -> bool {
        self.photos.is_empty()
    }
}

impl<T: Emptiness> Outcome<T> {
    pub fn from_fetch(result: Result<Fetched<T>, CraftyError>) -> Self {
        match result {
            Ok(fetched) if fetched.payload.is_empty_payload() => Outcome::Empty {
                source: fetched.source,
            },
            Ok(fetched) => Outcome::Success {
                payload: fetched.payload,
                source: fetched.source,
            },
            Err(e) => Outcome::Failed(e),
        }
    }
}

impl<T: Default> Outcome<T> {
    /// Collapse into a payload for callers that must never see an error.
    /// Failures are logged and replaced by the empty value.
    pub fn into_payload_or_default(self) -> T {
        match self {
            Outcome::Success { payload, .. } => payload,
            Outcome::Empty { .. } => T::default(),
            Outcome::Failed(e) => {
                warn!(error = %e, "upstream lookup failed, returning empty result");
                T::default()
            }
        }
    }

    /// Strict variant: failures propagate, empty answers become the empty value.
    pub fn into_result(self) -> Result<Fetched<T>, CraftyError> {
        match self {
            Outcome::Success { payload, source } => Ok(Fetched { payload, source }),
            Outcome::Empty { source } => Ok(Fetched {
                payload: T::default(),
                source,
            }),
            Outcome::Failed(e) => Err(e),
        }
    }
}

impl<T> Outcome<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}
