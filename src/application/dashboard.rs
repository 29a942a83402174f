use crate::application::cache_aside::CacheAside;
use crate::application::datalab::{keyword_trend, TrendRange};
use crate::application::news::naver_news;
use crate::application::videos::keyword_videos;
use crate::domain::error::CraftyError;
use crate::domain::model::Dashboard;
use crate::domain::traits::{NaverApi, YouTubeApi};

/// Keyword trend, news and videos fetched concurrently.
///
/// All three must succeed; the first failure fails the whole view.
pub async fn dashboard(
    cache: &CacheAside,
    naver: &dyn NaverApi,
    youtube: &dyn YouTubeApi,
    keyword: &str,
    max_videos: u32,
) -> Result<Dashboard, CraftyError> {
    let range = TrendRange::last_year(cache.now_ms(), "week");

    let (trend, news, videos) = futures_util::future::try_join3(
        async { keyword_trend(cache, naver, keyword, &range).await.into_result() },
        async { naver_news(cache, naver, keyword).await.into_result() },
        async { keyword_videos(cache, youtube, keyword, max_videos).await.into_result() },
    )
    .await?;

    Ok(Dashboard {
        keyword: keyword.to_string(),
        trend: trend.payload,
        news: news.payload,
        videos: videos.payload,
    })
}
