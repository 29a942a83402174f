use crate::application::cache_aside::CacheAside;
use crate::domain::cache::{cache_key, Collection, NEWS_TTL};
use crate::domain::model::{NewsArticle, Outcome};
use crate::domain::traits::NaverApi;
use crate::domain::transform;

/// Articles requested per search.
pub const NEWS_DISPLAY: u32 = 10;

/// Naver news for `query`, cached for ten minutes per normalized query.
pub async fn naver_news(
    cache: &CacheAside,
    naver: &dyn NaverApi,
    query: &str,
) -> Outcome<Vec<NewsArticle>> {
    let key = cache_key([query]);
    Outcome::from_fetch(
        cache
            .fetch(
                Collection::NaverNews,
                &key,
                query,
                NEWS_TTL,
                move || naver.search_news(query, NEWS_DISPLAY),
                transform::news_articles,
            )
            .await,
    )
}
