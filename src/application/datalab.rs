use crate::application::cache_aside::CacheAside;
use crate::domain::cache::{cache_key, Collection, DATALAB_TTL};
use crate::domain::error::CraftyError;
use crate::domain::model::{GenderAgeInsight, Outcome, TrendPoint};
use crate::domain::traits::NaverApi;
use crate::domain::transform;
use crate::domain::wire::{
    DataLabSearchRequest, KeywordGroup, ShoppingInsightRequest, ShoppingKeywordGroup,
    ShoppingKeywordParam,
};
use chrono::{DateTime, Days, Months, NaiveDate};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_UNITS: [&str; 3] = ["date", "week", "month"];

/// DataLab speaks Korean calendar days.
fn kst_today(now_ms: i64) -> NaiveDate {
    const KST_OFFSET_MS: i64 = 9 * 60 * 60 * 1000;
    DateTime::from_timestamp_millis(now_ms + KST_OFFSET_MS)
        .map(|t| t.date_naive())
        .unwrap_or(NaiveDate::MIN)
}

/// A DataLab query window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub time_unit: String,
}

impl TrendRange {
    /// The twelve months up to yesterday (KST).
    pub fn last_year(now_ms: i64, time_unit: &str) -> Self {
        let today = kst_today(now_ms);
        let end = today.checked_sub_days(Days::new(1)).unwrap_or(today);
        let start = end.checked_sub_months(Months::new(12)).unwrap_or(end);
        Self {
            start,
            end,
            time_unit: time_unit.to_string(),
        }
    }

    /// Validate caller-supplied bounds; missing pieces fall back to `last_year`.
    pub fn parse(
        now_ms: i64,
        start: Option<&str>,
        end: Option<&str>,
        time_unit: Option<&str>,
    ) -> Result<Self, CraftyError> {
        let unit = time_unit.unwrap_or("month");
        if !TIME_UNITS.contains(&unit) {
            return Err(CraftyError::InvalidInput(format!(
                "timeUnit must be one of date, week, month (got {:?})",
                unit
            )));
        }
        let mut range = Self::last_year(now_ms, unit);
        if let Some(s) = start {
            range.start = parse_date("startDate", s)?;
        }
        if let Some(e) = end {
            range.end = parse_date("endDate", e)?;
        }
        if range.start > range.end {
            return Err(CraftyError::InvalidInput(
                "startDate must not be after endDate".to_string(),
            ));
        }
        Ok(range)
    }

    fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }

    fn shopping_request(
        &self,
        category: &str,
        keyword: ShoppingKeywordParam,
    ) -> ShoppingInsightRequest {
        ShoppingInsightRequest {
            start_date: self.start_str(),
            end_date: self.end_str(),
            time_unit: self.time_unit.clone(),
            category: category.to_string(),
            keyword,
        }
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, CraftyError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        CraftyError::InvalidInput(format!("{} must be YYYY-MM-DD (got {:?})", field, value))
    })
}

/// Shopping audience split by gender and by age, cached for a day.
pub async fn gender_age_trend(
    cache: &CacheAside,
    naver: &dyn NaverApi,
    keyword: &str,
    category: &str,
) -> Outcome<GenderAgeInsight> {
    let range = TrendRange::last_year(cache.now_ms(), "month");
    let (start, end) = (range.start_str(), range.end_str());
    let key = cache_key(["genderAge", keyword, category, start.as_str(), end.as_str()]);
    let request =
        &range.shopping_request(category, ShoppingKeywordParam::Single(keyword.to_string()));

    Outcome::from_fetch(
        cache
            .fetch(
                Collection::NaverDatalab,
                &key,
                keyword,
                DATALAB_TTL,
                move || {
                    futures_util::future::try_join(
                        naver.shopping_gender(request),
                        naver.shopping_age(request),
                    )
                },
                |(gender, age)| transform::gender_age(gender, age),
            )
            .await,
    )
}

/// Monthly click trend of `keyword` inside a shopping category over the last year.
pub async fn seasonal_pattern(
    cache: &CacheAside,
    naver: &dyn NaverApi,
    keyword: &str,
    category: &str,
) -> Outcome<Vec<TrendPoint>> {
    let range = TrendRange::last_year(cache.now_ms(), "month");
    let (start, end) = (range.start_str(), range.end_str());
    let key = cache_key(["seasonal", keyword, category, start.as_str(), end.as_str()]);
    let request = &range.shopping_request(
        category,
        ShoppingKeywordParam::Groups(vec![ShoppingKeywordGroup {
            name: keyword.to_string(),
            param: vec![keyword.to_string()],
        }]),
    );

    Outcome::from_fetch(
        cache
            .fetch(
                Collection::NaverDatalab,
                &key,
                keyword,
                DATALAB_TTL,
                move || naver.shopping_keywords(request),
                transform::trend_points,
            )
            .await,
    )
}

/// Search-volume trend of `keyword` over `range`.
pub async fn keyword_trend(
    cache: &CacheAside,
    naver: &dyn NaverApi,
    keyword: &str,
    range: &TrendRange,
) -> Outcome<Vec<TrendPoint>> {
    let (start, end) = (range.start_str(), range.end_str());
    let key = cache_key([
        "trend",
        keyword,
        start.as_str(),
        end.as_str(),
        range.time_unit.as_str(),
    ]);
    let request = &DataLabSearchRequest {
        start_date: start,
        end_date: end,
        time_unit: range.time_unit.clone(),
        keyword_groups: vec![KeywordGroup {
            group_name: keyword.to_string(),
            keywords: vec![keyword.to_string()],
        }],
    };

    Outcome::from_fetch(
        cache
            .fetch(
                Collection::NaverDatalab,
                &key,
                keyword,
                DATALAB_TTL,
                move || naver.keyword_trend(request),
                transform::trend_points,
            )
            .await,
    )
}
