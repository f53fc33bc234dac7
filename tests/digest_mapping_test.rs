use chrono::{TimeZone, Utc};
use news_digest::{articles_from_json, format_timestamp, DigestError};
use serde_json::json;

#[test]
fn test_folds_article_rows_with_derived_sources() {
    let payload = json!([
        {"id": 1, "url": "https://www.cbc.ca/a", "title": "A", "date": "2024-01-21T08:30:00+00:00"},
        {"id": 2, "url": "https://ctvnews.ca/b", "title": "B", "date": null}
    ]);

    let articles = articles_from_json(payload).unwrap();

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].id, 1);
    assert_eq!(articles[0].source, "CBC News");
    assert_eq!(articles[0].date.as_deref(), Some("2024-01-21T08:30:00.000Z"));
    assert_eq!(articles[1].id, 2);
    assert_eq!(articles[1].source, "CTV News");
    assert_eq!(articles[1].date, None);
}

#[test]
fn test_empty_payload_folds_to_no_articles() {
    let articles = articles_from_json(json!([])).unwrap();
    assert!(articles.is_empty());
}

#[test]
fn test_null_title_passes_through_as_empty() {
    let payload = json!([
        {"id": 7, "url": "https://example.org/z", "title": null, "date": null}
    ]);

    let articles = articles_from_json(payload).unwrap();
    assert_eq!(articles[0].title, "");
    assert_eq!(articles[0].source, "example.org");
}

#[test]
fn test_bad_article_url_never_aborts_the_fold() {
    let payload = json!([
        {"id": 3, "url": "not a url", "title": "odd row", "date": null}
    ]);

    let articles = articles_from_json(payload).unwrap();
    assert_eq!(articles[0].source, "Unknown");
}

#[test]
fn test_malformed_payload_is_a_serialization_error() {
    let err = articles_from_json(json!({"oops": true})).unwrap_err();
    assert!(matches!(err, DigestError::Serialization(_)));
}

#[test]
fn test_timestamps_normalize_to_millisecond_rfc3339() {
    let ts = Utc.with_ymd_and_hms(2024, 1, 22, 0, 0, 0).unwrap();
    assert_eq!(format_timestamp(ts), "2024-01-22T00:00:00.000Z");

    let ts = Utc.timestamp_millis_opt(1_705_881_599_999).unwrap();
    assert_eq!(format_timestamp(ts), "2024-01-21T23:59:59.999Z");
}
