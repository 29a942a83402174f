//! Route table.

use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use crate::interfaces::http::handlers;
use crate::interfaces::http::rate_limit::rate_limit;
use crate::state::AppState;

/// Data endpoints sit behind the per-IP limiter; `/health` does not.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/getTopVideos", get(handlers::get_top_videos))
        .route("/getKeywordVideos", get(handlers::get_keyword_videos))
        .route("/getGoogleImages", get(handlers::get_google_images))
        .route("/getPexelsPhotos", get(handlers::get_pexels_photos))
        .route("/getNaverNews", get(handlers::get_naver_news))
        .route("/getGenderAgeTrend", get(handlers::get_gender_age_trend))
        .route("/getSeasonalPattern", get(handlers::get_seasonal_pattern))
        .route("/getKeywordTrend", get(handlers::get_keyword_trend))
        .route("/getDashboard", get(handlers::get_dashboard))
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}
