//! Router behaviour with in-process upstreams.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use common::{Fakes, NOW};
use craftylink::infrastructure::clock::ManualClock;
use craftylink::infrastructure::config::Config;
use craftylink::infrastructure::storage::MemoryStore;
use craftylink::interfaces::http::create_router;
use craftylink::state::AppState;
use serde_json::{json, Value};
use tower::ServiceExt;

// Behind a proxy, so `X-Forwarded-For` separates clients.
fn app(fakes: &Fakes) -> Router {
    let mut config = Config::default();
    config.server.trust_proxy = true;
    app_with(fakes, config)
}

fn app_with(fakes: &Fakes, config: Config) -> Router {
    let state = AppState::with_parts(
        config,
        Arc::new(MemoryStore::new()),
        Arc::new(ManualClock::new(NOW)),
        fakes.services(),
    );
    create_router(Arc::new(state))
}

fn get_from(uri: &str, client: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-forwarded-for", client)
        .body(Body::empty())
        .unwrap()
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_thirty_first_request_is_rate_limited() {
    let fakes = Fakes::new();
    let app = app(&fakes);

    for i in 1..=30 {
        let (status, _) = call(&app, get_from("/getNaverNews?query=rust", "203.0.113.7")).await;
        assert_eq!(status, StatusCode::OK, "request {}", i);
    }

    let (status, body) = call(&app, get_from("/getNaverNews?query=rust", "203.0.113.7")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        body,
        json!({"error": {
            "code": "RATE_LIMITED",
            "message": "Too many requests, please try again later."
        }})
    );

    // Other clients keep their own window.
    let (status, _) = call(&app, get_from("/getNaverNews?query=rust", "198.51.100.2")).await;
    assert_eq!(status, StatusCode::OK);

    // Only the first request reached Naver; the rest were cache hits.
    assert_eq!(fakes.naver.news.calls(), 1);
}

#[tokio::test]
async fn test_rotating_first_forwarded_hop_does_not_reset_the_window() {
    let fakes = Fakes::new();
    let app = app(&fakes);

    let mut ok = 0;
    for i in 0..100u32 {
        let chain = format!("10.9.{}.{}, 198.51.100.1", i / 256, i % 256);
        let (status, _) = call(&app, get_from("/getNaverNews?query=rust", &chain)).await;
        if status == StatusCode::OK {
            ok += 1;
        } else {
            assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        }
    }
    assert_eq!(ok, 30);
}

#[tokio::test]
async fn test_forwarded_header_is_ignored_without_a_proxy() {
    let fakes = Fakes::new();
    let app = app_with(&fakes, Config::default());

    for i in 0..30u32 {
        let (status, _) = call(&app, get_from("/getNaverNews?query=rust", &format!("203.0.113.{}", i))).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) = call(&app, get_from("/getNaverNews?query=rust", "198.51.100.2")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_gender_age_endpoint_caches_for_the_day() {
    let fakes = Fakes::new();
    let app = app(&fakes);
    let uri = "/getGenderAgeTrend?keyword=%EB%85%B8%ED%8A%B8%EB%B6%81";

    let (status, first) = call(&app, get_from(uri, "10.0.0.1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        first,
        json!({
            "genderGroups": [{"group": "f", "value": 45.0}, {"group": "m", "value": 55.0}],
            "ageGroups": [{"group": "20", "value": 30.0}, {"group": "30", "value": 70.0}]
        })
    );

    let (_, second) = call(&app, get_from(uri, "10.0.0.1")).await;
    assert_eq!(second, first);
    assert_eq!(fakes.naver.gender.calls(), 1);
    assert_eq!(fakes.naver.age.calls(), 1);
}

#[tokio::test]
async fn test_top_videos_shape() {
    let fakes = Fakes::new();
    let app = app(&fakes);

    let (status, body) = call(
        &app,
        get_from("/getTopVideos?lat=37.5665&lng=126.978&radius=10km", "10.0.0.1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "서울");
    assert_eq!(body["source"], "api");
    assert_eq!(body["cached"], false);
    assert_eq!(body["items"][0]["channelTitle"], "채널");
    assert_eq!(body["items"][0]["viewCount"], "1200");

    let (_, again) = call(
        &app,
        get_from("/getTopVideos?lat=37.5665&lng=126.978&radius=10km", "10.0.0.1"),
    )
    .await;
    assert_eq!(again["source"], "cache");
    assert_eq!(again["cached"], true);
}

#[tokio::test]
async fn test_top_videos_requires_coordinates() {
    let fakes = Fakes::new();
    let app = app(&fakes);

    let (status, body) = call(&app, get_from("/getTopVideos?lat=37.5&radius=10km", "10.0.0.1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(fakes.youtube.search.calls(), 0);
}

#[tokio::test]
async fn test_image_endpoints() {
    let fakes = Fakes::new();
    let app = app(&fakes);

    let (status, google) = call(&app, get_from("/getGoogleImages?query=sea&start=11", "10.0.0.1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(google["photos"][0]["id"], "sea-11");
    assert_eq!(google["photos"][0]["url"], "https://example.com/a");
    assert_eq!(google["nextPage"], 21);

    let (status, pexels) = call(&app, get_from("/getPexelsPhotos?query=sea", "10.0.0.1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pexels["photos"][0]["imageUrl"], "https://images.pexels.com/42-large.jpg");
    assert_eq!(pexels["nextPage"], 2);

    fakes.images.google.fail(true);
    let (status, empty) = call(&app, get_from("/getGoogleImages?query=sea", "10.0.0.1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty, json!({"photos": [], "nextPage": null}));
}

#[tokio::test]
async fn test_keyword_trend_validates_dates() {
    let fakes = Fakes::new();
    let app = app(&fakes);

    let (status, body) = call(
        &app,
        get_from(
            "/getKeywordTrend?keyword=camping&startDate=2024-02-01&endDate=2024-01-01",
            "10.0.0.1",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, points) = call(
        &app,
        get_from(
            "/getKeywordTrend?keyword=camping&startDate=2024-01-01&endDate=2024-02-01&timeUnit=week",
            "10.0.0.1",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(points[0], json!({"date": "2024-01-01", "value": 40.0}));
    assert_eq!(fakes.naver.trend.calls(), 1);
}

#[tokio::test]
async fn test_dashboard_reports_upstream_failure() {
    let fakes = Fakes::new();
    let app = app(&fakes);

    let (status, body) = call(&app, get_from("/getDashboard?keyword=camping", "10.0.0.1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["keyword"], "camping");
    assert_eq!(body["news"].as_array().map(Vec::len), Some(1));

    fakes.naver.trend.fail(true);
    let (status, body) = call(&app, get_from("/getDashboard?keyword=hiking", "10.0.0.1")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
}
