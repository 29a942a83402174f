use crate::domain::error::CraftyError;
use crate::domain::model::{Fetched, ImagePage, Outcome, Source};
use crate::domain::traits::{ImageSearchApi, StockPhotoApi};
use crate::domain::transform;

// Image lookups are paged and not cached.
fn outcome(result: Result<ImagePage, CraftyError>) -> Outcome<ImagePage> {
    Outcome::from_fetch(result.map(|payload| Fetched {
        payload,
        source: Source::Api,
    }))
}

/// Google image search. `start` is the 1-based result index Google pages by;
/// Custom Search refuses anything past 91.
pub async fn google_images(
    google: &dyn ImageSearchApi,
    query: &str,
    start: u32,
) -> Outcome<ImagePage> {
    let start = start.clamp(1, 91);
    outcome(
        google
            .search_images(query, start)
            .await
            .map(transform::google_images),
    )
}

pub async fn pexels_photos(
    pexels: &dyn StockPhotoApi,
    query: &str,
    page: u32,
) -> Outcome<ImagePage> {
    outcome(
        pexels
            .search_photos(query, page.max(1))
            .await
            .map(transform::pexels_photos),
    )
}
