//! HTTP client for the companion stats service.
//!
//! Hit recording is fire-and-forget: a failure to reach the stats service
//! must never fail the public read path. View lookups likewise degrade to
//! zero views with a warning.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use ewm_core::time::{self, date_format};
use ewm_core::types::Timestamp;
use ewm_core::APP_NAME;

/// Payload for `POST /hit`.
#[derive(Debug, Clone, Serialize)]
pub struct HitDto {
    pub app: String,
    pub uri: String,
    pub ip: String,
    #[serde(with = "date_format")]
    pub timestamp: Timestamp,
}

/// One aggregation row from `GET /stats`.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewStatsDto {
    pub app: String,
    pub uri: String,
    pub hits: i64,
}

/// Client for the stats service.
#[derive(Clone)]
pub struct StatsClient {
    http: reqwest::Client,
    base_url: String,
}

impl StatsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        StatsClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Record a hit asynchronously. Errors are logged, never propagated.
    pub fn record_hit(&self, uri: &str, ip: &str) {
        let hit = HitDto {
            app: APP_NAME.to_string(),
            uri: uri.to_string(),
            ip: ip.to_string(),
            timestamp: time::now(),
        };
        let http = self.http.clone();
        let url = format!("{}/hit", self.base_url);
        tokio::spawn(async move {
            match http.post(&url).json(&hit).send().await {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!(status = %response.status(), uri = %hit.uri, "Stats service rejected hit");
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(error = %err, uri = %hit.uri, "Failed to record hit");
                }
            }
        });
    }

    /// Fetch unique view counts for the given URIs, keyed by URI.
    ///
    /// Returns an empty map when the stats service is unreachable.
    pub async fn get_views(&self, uris: &[String]) -> HashMap<String, i64> {
        if uris.is_empty() {
            return HashMap::new();
        }
        let url = format!("{}/stats", self.base_url);
        let result = self
            .http
            .get(&url)
            .query(&[
                ("start", time::format_date_time(&time::earliest())),
                ("end", time::format_date_time(&time::far_future())),
                ("uris", uris.join(",")),
                ("unique", "true".to_string()),
            ])
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to query stats service");
                return HashMap::new();
            }
        };

        match response.json::<Vec<ViewStatsDto>>().await {
            Ok(rows) => rows.into_iter().map(|row| (row.uri, row.hits)).collect(),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to decode stats response");
                HashMap::new()
            }
        }
    }
}

/// URI under which an event's public views are recorded.
pub fn event_uri(event_id: i64) -> String {
    format!("/events/{event_id}")
}
