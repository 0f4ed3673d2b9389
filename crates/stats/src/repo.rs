//! Persistence for the hit log.

use ewm_core::types::Timestamp;

use crate::models::{HitDto, ViewStats};
use crate::DbPool;

pub struct StatRepo;

impl StatRepo {
    /// Append one hit to the log.
    pub async fn insert_hit(pool: &DbPool, hit: &HitDto) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO stats (app, uri, ip, sent_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&hit.app)
        .bind(&hit.uri)
        .bind(&hit.ip)
        .bind(hit.timestamp)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Aggregate hits per (app, uri) within the range, busiest URIs first.
    ///
    /// With `unique` set, each IP counts once per URI. A `None` URI filter
    /// aggregates over every recorded URI.
    pub async fn aggregate(
        pool: &DbPool,
        start: Timestamp,
        end: Timestamp,
        uris: Option<&[String]>,
        unique: bool,
    ) -> Result<Vec<ViewStats>, sqlx::Error> {
        let count_expr = if unique {
            "COUNT(DISTINCT ip)"
        } else {
            "COUNT(*)"
        };
        let query = format!(
            r#"
            SELECT app, uri, {count_expr} AS hits
            FROM stats
            WHERE sent_at >= $1 AND sent_at <= $2
              AND ($3::text[] IS NULL OR uri = ANY($3))
            GROUP BY app, uri
            ORDER BY hits DESC
            "#,
        );
        sqlx::query_as::<_, ViewStats>(&query)
            .bind(start)
            .bind(end)
            .bind(uris)
            .fetch_all(pool)
            .await
    }
}
