use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const NEWS_TTL: Duration = Duration::from_secs(10 * 60);
pub const VIDEO_TTL: Duration = Duration::from_secs(10 * 60);
pub const DATALAB_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Document collections, one per feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Cities,
    NaverNews,
    NaverDatalab,
    KeywordVideos,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Cities,
        Collection::NaverNews,
        Collection::NaverDatalab,
        Collection::KeywordVideos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Cities => "cities",
            Collection::NaverNews => "naverNews",
            Collection::NaverDatalab => "naverDatalabCache",
            Collection::KeywordVideos => "youtubeKeywordVideos",
        }
    }
}

/// A stored upstream answer. Overwritten as a whole on refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheEntry {
    pub key: String,
    pub payload: serde_json::Value,
    /// Unix milliseconds at time of write.
    pub stored_at: i64,
}

impl CacheEntry {
    pub fn is_fresh(&self, now_ms: i64, ttl: Duration) -> bool {
        let age = now_ms.saturating_sub(self.stored_at);
        age >= 0 && (age as u128) < ttl.as_millis()
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

/// Build a document-safe key from the query descriptor.
///
/// Fields are concatenated and everything except ASCII letters, digits and
/// Hangul syllables is dropped, so "노트북!" and "노트북" share one key.
pub fn cache_key<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .flat_map(|p| p.as_ref().chars().filter(|c| is_key_char(*c)).collect::<Vec<_>>())
        .collect()
}

/// `stored_at` cutoff for pruning entries older than `hours`. An age too large
/// to represent prunes everything.
pub fn prune_cutoff(now_ms: i64, hours: u64) -> i64 {
    hours
        .checked_mul(3_600_000)
        .and_then(|ms| i64::try_from(ms).ok())
        .and_then(|ms| now_ms.checked_sub(ms))
        .unwrap_or(i64::MAX)
}
