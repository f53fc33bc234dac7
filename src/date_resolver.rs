use crate::types::{DigestError, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

/// Inclusive anchor-timestamp window covering exactly one civil day of digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Parse a caller-supplied civil date, strictly `YYYY-MM-DD`.
///
/// Rejected before any store access; the date string is treated as a civil
/// date and never converted through a timezone.
pub fn parse_news_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| DigestError::InvalidDate(input.to_string()))
}

/// Resolve a news date to the window its digests were anchored into.
///
/// Summaries are processed the day after the news they cover, so news date D
/// maps to `[D+1 00:00:00.000, D+1 23:59:59.999]` on the `processed_at`
/// column. Both bounds are inclusive and millisecond-exact; the windows of
/// adjacent news dates meet one millisecond apart and never overlap.
pub fn window_for_news_date(news_date: NaiveDate) -> AnchorWindow {
    let anchor_date = news_date + Duration::days(1);
    let start = anchor_date.and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(1) - Duration::milliseconds(1);
    AnchorWindow { start, end }
}

/// Inverse of the processing offset: the civil date an anchor date presents
/// as. Used by the available-dates listing so that every listed date resolves
/// back onto the window its digests actually occupy.
pub fn news_date_for_anchor(anchor_date: NaiveDate) -> NaiveDate {
    anchor_date - Duration::days(1)
}
