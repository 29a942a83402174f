//! In-process stand-ins for the upstream APIs. Each one counts its calls and
//! can be switched to answer with an HTTP 500.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use craftylink::domain::error::CraftyError;
use craftylink::domain::traits::{GeocodeApi, ImageSearchApi, NaverApi, StockPhotoApi, YouTubeApi};
use craftylink::domain::wire::*;
use craftylink::state::Services;
use serde_json::json;

pub const NOW: i64 = 1_710_430_200_000;

#[derive(Default)]
pub struct Switch {
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl Switch {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn hit(&self, api: &'static str) -> Result<(), CraftyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(CraftyError::upstream(api, 500, "internal server error"));
        }
        Ok(())
    }
}

fn parse<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).unwrap()
}

#[derive(Default)]
pub struct FakeNaver {
    pub news: Switch,
    pub trend: Switch,
    pub gender: Switch,
    pub age: Switch,
    pub keywords: Switch,
}

impl FakeNaver {
    pub fn fail_all(&self) {
        for s in [&self.news, &self.trend, &self.gender, &self.age, &self.keywords] {
            s.fail(true);
        }
    }
}

#[async_trait]
impl NaverApi for FakeNaver {
    async fn search_news(&self, query: &str, _: u32) -> Result<NaverNewsResponse, CraftyError> {
        self.news.hit("naver")?;
        Ok(parse(json!({
            "items": [{
                "title": format!("<b>{}</b> 신제품 출시", query),
                "originallink": "https://news.example.com/1",
                "link": "https://n.news.naver.com/1",
                "description": "가벼운 &quot;초경량&quot; 모델"
            }]
        })))
    }

    async fn keyword_trend(
        &self,
        req: &DataLabSearchRequest,
    ) -> Result<DataLabResponse, CraftyError> {
        self.trend.hit("naver")?;
        Ok(parse(json!({
            "results": [{
                "title": req.keyword_groups[0].group_name,
                "data": [
                    {"period": req.start_date, "ratio": 40.0},
                    {"period": req.end_date, "ratio": 100.0}
                ]
            }]
        })))
    }

    async fn shopping_gender(
        &self,
        _: &ShoppingInsightRequest,
    ) -> Result<DataLabResponse, CraftyError> {
        self.gender.hit("naver")?;
        Ok(parse(json!({
            "results": [{
                "data": [
                    {"period": "2023-04-01", "group": "f", "ratio": 40.0},
                    {"period": "2023-04-01", "group": "m", "ratio": 60.0},
                    {"period": "2023-05-01", "group": "f", "ratio": 50.0},
                    {"period": "2023-05-01", "group": "m", "ratio": 50.0}
                ]
            }]
        })))
    }

    async fn shopping_age(
        &self,
        _: &ShoppingInsightRequest,
    ) -> Result<DataLabResponse, CraftyError> {
        self.age.hit("naver")?;
        Ok(parse(json!({
            "results": [{
                "data": [
                    {"period": "2023-04-01", "group": "20", "ratio": 30.0},
                    {"period": "2023-04-01", "group": "30", "ratio": 70.0}
                ]
            }]
        })))
    }

    async fn shopping_keywords(
        &self,
        _: &ShoppingInsightRequest,
    ) -> Result<DataLabResponse, CraftyError> {
        self.keywords.hit("naver")?;
        Ok(parse(json!({
            "results": [{
                "data": [
                    {"period": "2023-11-01", "ratio": 80.0},
                    {"period": "2023-12-01", "ratio": 100.0}
                ]
            }]
        })))
    }
}

#[derive(Default)]
pub struct FakeYouTube {
    pub search: Switch,
    pub videos: Switch,
}

#[async_trait]
impl YouTubeApi for FakeYouTube {
    async fn search_by_location(
        &self,
        _: f64,
        _: f64,
        _: &str,
        _: u32,
    ) -> Result<YouTubeSearchResponse, CraftyError> {
        self.search.hit("youtube")?;
        Ok(parse(json!({"items": [{"id": {"videoId": "v1"}}, {"id": {"videoId": "v2"}}]})))
    }

    async fn search_by_keyword(
        &self,
        _: &str,
        _: u32,
    ) -> Result<YouTubeSearchResponse, CraftyError> {
        self.search.hit("youtube")?;
        Ok(parse(json!({"items": [{"id": {"videoId": "k1"}}]})))
    }

    async fn videos(&self, ids: &[String]) -> Result<YouTubeVideosResponse, CraftyError> {
        self.videos.hit("youtube")?;
        let items: Vec<serde_json::Value> = ids
            .iter()
            .map(|id| {
                json!({
                    "id": id,
                    "snippet": {
                        "title": format!("video {}", id),
                        "channelTitle": "채널",
                        "publishedAt": "2024-03-01T00:00:00Z",
                        "thumbnails": {"high": {"url": format!("https://i.ytimg.com/{}.jpg", id)}}
                    },
                    "statistics": {"viewCount": "1200"}
                })
            })
            .collect();
        Ok(parse(json!({ "items": items })))
    }
}

#[derive(Default)]
pub struct FakeKakao {
    pub lookups: Switch,
}

#[async_trait]
impl GeocodeApi for FakeKakao {
    async fn coord_to_address(&self, _: f64, _: f64) -> Result<KakaoCoordResponse, CraftyError> {
        self.lookups.hit("kakao")?;
        Ok(parse(json!({"documents": [{"address": {"region_1depth_name": "서울"}}]})))
    }
}

#[derive(Default)]
pub struct FakeImages {
    pub google: Switch,
    pub pexels: Switch,
}

#[async_trait]
impl ImageSearchApi for FakeImages {
    async fn search_images(
        &self,
        query: &str,
        start: u32,
    ) -> Result<GoogleSearchResponse, CraftyError> {
        self.google.hit("google")?;
        Ok(parse(json!({
            "items": [{
                "cacheId": format!("{}-{}", query, start),
                "link": "https://img.example.com/a.jpg",
                "title": "a",
                "image": {"contextLink": "https://example.com/a"}
            }],
            "queries": {"nextPage": [{"startIndex": start + 10}]}
        })))
    }
}

#[async_trait]
impl StockPhotoApi for FakeImages {
    async fn search_photos(&self, _: &str, page: u32) -> Result<PexelsSearchResponse, CraftyError> {
        self.pexels.hit("pexels")?;
        Ok(parse(json!({
            "page": page,
            "photos": [{
                "id": 42,
                "url": "https://www.pexels.com/photo/42/",
                "alt": "sea",
                "src": {"large": "https://images.pexels.com/42-large.jpg", "original": "https://images.pexels.com/42.jpg"}
            }],
            "next_page": "https://api.pexels.com/v1/search?page=2"
        })))
    }
}

pub struct Fakes {
    pub naver: Arc<FakeNaver>,
    pub youtube: Arc<FakeYouTube>,
    pub kakao: Arc<FakeKakao>,
    pub images: Arc<FakeImages>,
}

impl Fakes {
    pub fn new() -> Self {
        Self {
            naver: Arc::new(FakeNaver::default()),
            youtube: Arc::new(FakeYouTube::default()),
            kakao: Arc::new(FakeKakao::default()),
            images: Arc::new(FakeImages::default()),
        }
    }

    pub fn services(&self) -> Services {
        Services {
            naver: self.naver.clone(),
            youtube: self.youtube.clone(),
            geocode: self.kakao.clone(),
            images: self.images.clone(),
            stock_photos: self.images.clone(),
        }
    }
}
