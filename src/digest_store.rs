use crate::date_resolver;
use crate::source::source_from_url;
use crate::types::{format_timestamp, Article, Digest, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::{debug, info};

/// Read-side handle over the summaries store.
///
/// Owns a bounded connection pool: acquire one at process start, call
/// [`DigestStore::close`] at shutdown. Both public operations issue exactly
/// one round-trip and do the rest of their work in-process.
pub struct DigestStore {
    db: PgPool,
}

impl DigestStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        // Schema is managed with migrations; run `sqlx migrate run` before
        // first use.

        Ok(Self { db })
    }

    /// Wrap a pool the surrounding application already manages.
    pub fn from_pool(db: PgPool) -> Self {
        Self { db }
    }

    /// Drain the pool. Call once at shutdown.
    pub async fn close(&self) {
        self.db.close().await;
    }

    /// Every digest whose anchor falls on the given news date, newest anchor
    /// first, each with its nested articles fully populated.
    ///
    /// One grouped query: articles are folded per digest with `json_agg`, so
    /// the round-trip count stays at one no matter how many digests match.
    /// Digests with no articles surface with an empty list. An empty result
    /// is not an error. Ties on the anchor break by `cluster_id` ascending;
    /// articles within a digest are ordered by id.
    pub async fn get_digests_for_date(&self, date: &str) -> Result<Vec<Digest>> {
        let news_date = date_resolver::parse_news_date(date)?;
        let window = date_resolver::window_for_news_date(news_date);

        debug!(
            "Resolved news date {} to anchor window {} .. {}",
            news_date, window.start, window.end
        );

        let rows = sqlx::query(
            r#"
            SELECT
                s.id,
                s.summary,
                s.cluster_id,
                s.processed_at,
                COALESCE(
                    json_agg(
                        json_build_object(
                            'id', a.id,
                            'url', a.url,
                            'title', a.title,
                            'date', a.date
                        )
                        ORDER BY a.id
                    ) FILTER (WHERE a.id IS NOT NULL),
                    '[]'
                ) AS articles
            FROM summaries s
            LEFT JOIN articles a ON a.summary_id = s.id
            WHERE s.processed_at >= $1 AND s.processed_at <= $2
            GROUP BY s.id, s.summary, s.cluster_id, s.processed_at
            ORDER BY s.processed_at DESC, s.cluster_id ASC
            "#,
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.db)
        .await?;

        let mut digests = Vec::with_capacity(rows.len());
        for row in &rows {
            digests.push(digest_from_row(row)?);
        }

        info!("Loaded {} digests for news date {}", digests.len(), news_date);
        Ok(digests)
    }

    /// Every distinct news date that has at least one digest, descending.
    ///
    /// Anchor dates are bucketed in UTC and shifted back through the
    /// processing offset, so each listed date is guaranteed to resolve onto a
    /// non-empty window in [`DigestStore::get_digests_for_date`].
    pub async fn list_available_dates(&self) -> Result<Vec<String>> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT (processed_at AT TIME ZONE 'UTC')::date AS anchor_date
            FROM summaries
            ORDER BY anchor_date DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let mut dates = Vec::with_capacity(rows.len());
        for row in rows {
            let anchor_date: NaiveDate = row.try_get("anchor_date")?;
            dates.push(date_resolver::news_date_for_anchor(anchor_date).to_string());
        }

        debug!("Store has digests for {} news dates", dates.len());
        Ok(dates)
    }
}

/// Nested article shape produced by the `json_agg` in the digest query.
#[derive(Debug, Deserialize)]
struct ArticleRow {
    id: i64,
    url: String,
    title: Option<String>,
    date: Option<DateTime<Utc>>,
}

fn digest_from_row(row: &PgRow) -> Result<Digest> {
    let processed_at: DateTime<Utc> = row.try_get("processed_at")?;
    let articles_json: serde_json::Value = row.try_get("articles")?;

    Ok(Digest {
        id: row.try_get("id")?,
        summary: row.try_get("summary")?,
        cluster_id: row.try_get("cluster_id")?,
        processed_at: format_timestamp(processed_at),
        articles: articles_from_json(articles_json)?,
    })
}

/// Decode the folded article payload, deriving each article's source and
/// normalizing its publish timestamp. Absent dates stay `None`.
pub fn articles_from_json(value: serde_json::Value) -> Result<Vec<Article>> {
    let rows: Vec<ArticleRow> = serde_json::from_value(value)?;

    Ok(rows
        .into_iter()
        .map(|row| Article {
            id: row.id,
            source: source_from_url(&row.url),
            url: row.url,
            title: row.title.unwrap_or_default(),
            date: row.date.map(format_timestamp),
        })
        .collect())
}
