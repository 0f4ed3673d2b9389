//! Repository for the `requests` table.
//!
//! Status-changing writes take an open transaction connection so the caller
//! can hold the event row lock across the whole decision.

use sqlx::{PgConnection, PgPool};

use ewm_core::participation::RequestStatus;
use ewm_core::types::{DbId, Timestamp};

use crate::models::request::ParticipationRequest;

/// Column list for `requests` queries.
const REQUEST_COLUMNS: &str = "id, created, event_id, requester_id, status";

/// Provides data access for participation requests.
pub struct RequestRepo;

impl RequestRepo {
    /// Find a request by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ParticipationRequest>, sqlx::Error> {
        let query = format!("SELECT {REQUEST_COLUMNS} FROM requests WHERE id = $1");
        sqlx::query_as::<_, ParticipationRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all requests made by a user, oldest first.
    pub async fn list_by_requester(
        pool: &PgPool,
        requester_id: DbId,
    ) -> Result<Vec<ParticipationRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {REQUEST_COLUMNS} FROM requests WHERE requester_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, ParticipationRequest>(&query)
            .bind(requester_id)
            .fetch_all(pool)
            .await
    }

    /// List all requests targeting an event, oldest first.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<ParticipationRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {REQUEST_COLUMNS} FROM requests WHERE event_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, ParticipationRequest>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Whether the user already has a request for the event.
    pub async fn exists_for(
        conn: &mut PgConnection,
        event_id: DbId,
        requester_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM requests WHERE event_id = $1 AND requester_id = $2)",
        )
        .bind(event_id)
        .bind(requester_id)
        .fetch_one(conn)
        .await
    }

    /// Insert a new request with the given initial status.
    pub async fn insert(
        conn: &mut PgConnection,
        event_id: DbId,
        requester_id: DbId,
        created: Timestamp,
        status: RequestStatus,
    ) -> Result<ParticipationRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO requests (created, event_id, requester_id, status) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {REQUEST_COLUMNS}"
        );
        sqlx::query_as::<_, ParticipationRequest>(&query)
            .bind(created)
            .bind(event_id)
            .bind(requester_id)
            .bind(status.as_str())
            .fetch_one(conn)
            .await
    }

    /// Fetch a subset of an event's requests by ID, in the given order of
    /// IDs ascending.
    pub async fn list_for_event_by_ids(
        conn: &mut PgConnection,
        event_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<ParticipationRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {REQUEST_COLUMNS} FROM requests \
             WHERE event_id = $1 AND id = ANY($2) ORDER BY id"
        );
        sqlx::query_as::<_, ParticipationRequest>(&query)
            .bind(event_id)
            .bind(ids)
            .fetch_all(conn)
            .await
    }

    /// Set the status of one request and return the updated row.
    pub async fn update_status(
        conn: &mut PgConnection,
        id: DbId,
        status: RequestStatus,
    ) -> Result<ParticipationRequest, sqlx::Error> {
        let query = format!(
            "UPDATE requests SET status = $2 WHERE id = $1 RETURNING {REQUEST_COLUMNS}"
        );
        sqlx::query_as::<_, ParticipationRequest>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_one(conn)
            .await
    }

    /// Set the status of several requests and return the updated rows in
    /// ID order.
    pub async fn update_status_bulk(
        conn: &mut PgConnection,
        ids: &[DbId],
        status: RequestStatus,
    ) -> Result<Vec<ParticipationRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE requests SET status = $2 WHERE id = ANY($1) RETURNING {REQUEST_COLUMNS}"
        );
        let mut rows = sqlx::query_as::<_, ParticipationRequest>(&query)
            .bind(ids)
            .bind(status.as_str())
            .fetch_all(conn)
            .await?;
        rows.sort_by_key(|r| r.id);
        Ok(rows)
    }
}
