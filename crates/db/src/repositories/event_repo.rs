//! Repository for the `events` table.

use sqlx::{PgConnection, PgPool};

use ewm_core::event_state::EventState;
use ewm_core::types::{DbId, Timestamp};

use crate::models::event::{
    AdminEventFilter, EventCapacity, EventPatch, EventRecord, NewEventDto, PublicEventFilter,
};

/// Column list for joined `events` queries.
const EVENT_COLUMNS: &str = "\
    e.id, e.annotation, e.category_id, c.name AS category_name, \
    e.confirmed_requests, e.created_on, e.description, e.event_date, \
    e.initiator_id, u.name AS initiator_name, e.lat, e.lon, e.paid, \
    e.participant_limit, e.published_on, e.request_moderation, e.state, e.title";

/// Join clause shared by every record query.
const EVENT_FROM: &str = "\
    events e \
    JOIN categories c ON c.id = e.category_id \
    JOIN users u ON u.id = e.initiator_id";

/// Provides data access for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event in PENDING state and return the joined record.
    pub async fn create(
        pool: &PgPool,
        initiator_id: DbId,
        dto: &NewEventDto,
        created_on: Timestamp,
    ) -> Result<EventRecord, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO events \
                 (annotation, category_id, created_on, description, event_date, \
                  initiator_id, lat, lon, paid, participant_limit, \
                  request_moderation, state, title) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING id",
        )
        .bind(&dto.annotation)
        .bind(dto.category)
        .bind(created_on)
        .bind(&dto.description)
        .bind(dto.event_date)
        .bind(initiator_id)
        .bind(dto.location.lat)
        .bind(dto.location.lon)
        .bind(dto.paid)
        .bind(dto.participant_limit)
        .bind(dto.request_moderation)
        .bind(EventState::Pending.as_str())
        .bind(&dto.title)
        .fetch_one(pool)
        .await?;

        let query = format!("SELECT {EVENT_COLUMNS} FROM {EVENT_FROM} WHERE e.id = $1");
        sqlx::query_as::<_, EventRecord>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Find an event by its ID.
    pub async fn find_record(pool: &PgPool, id: DbId) -> Result<Option<EventRecord>, sqlx::Error> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM {EVENT_FROM} WHERE e.id = $1");
        sqlx::query_as::<_, EventRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a published event by its ID.
    pub async fn find_published(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EventRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM {EVENT_FROM} WHERE e.id = $1 AND e.state = $2"
        );
        sqlx::query_as::<_, EventRecord>(&query)
            .bind(id)
            .bind(EventState::Published.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Find an event belonging to a specific initiator.
    pub async fn find_record_of_initiator(
        pool: &PgPool,
        id: DbId,
        initiator_id: DbId,
    ) -> Result<Option<EventRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM {EVENT_FROM} \
             WHERE e.id = $1 AND e.initiator_id = $2"
        );
        sqlx::query_as::<_, EventRecord>(&query)
            .bind(id)
            .bind(initiator_id)
            .fetch_optional(pool)
            .await
    }

    /// List an initiator's events, newest first.
    pub async fn list_by_initiator(
        pool: &PgPool,
        initiator_id: DbId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<EventRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM {EVENT_FROM} \
             WHERE e.initiator_id = $1 \
             ORDER BY e.id DESC \
             OFFSET $2 LIMIT $3"
        );
        sqlx::query_as::<_, EventRecord>(&query)
            .bind(initiator_id)
            .bind(offset)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Fetch joined records for an explicit ID set, in ID order.
    pub async fn records_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<EventRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM {EVENT_FROM} \
             WHERE e.id = ANY($1) ORDER BY e.id"
        );
        sqlx::query_as::<_, EventRecord>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Admin search with conjunctive NULL-guarded filters.
    pub async fn admin_search(
        pool: &PgPool,
        filter: &AdminEventFilter,
    ) -> Result<Vec<EventRecord>, sqlx::Error> {
        let states: Option<Vec<String>> = filter
            .states
            .as_ref()
            .map(|s| s.iter().map(|st| st.as_str().to_string()).collect());
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM {EVENT_FROM} \
             WHERE ($1::bigint[] IS NULL OR e.initiator_id = ANY($1)) \
               AND ($2::text[] IS NULL OR e.state = ANY($2)) \
               AND ($3::bigint[] IS NULL OR e.category_id = ANY($3)) \
               AND e.event_date >= $4 AND e.event_date <= $5 \
             ORDER BY e.id \
             OFFSET $6 LIMIT $7"
        );
        sqlx::query_as::<_, EventRecord>(&query)
            .bind(filter.users.as_deref())
            .bind(states.as_deref())
            .bind(filter.categories.as_deref())
            .bind(filter.range_start)
            .bind(filter.range_end)
            .bind(filter.offset)
            .bind(filter.limit)
            .fetch_all(pool)
            .await
    }

    /// Public search over published events, ordered by event date. Sorting
    /// by views happens in the caller after view enrichment.
    pub async fn public_search(
        pool: &PgPool,
        filter: &PublicEventFilter,
    ) -> Result<Vec<EventRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM {EVENT_FROM} \
             WHERE e.state = $1 \
               AND ($2::text IS NULL OR \
                    e.annotation ILIKE '%' || $2 || '%' OR \
                    e.description ILIKE '%' || $2 || '%') \
               AND ($3::bigint[] IS NULL OR e.category_id = ANY($3)) \
               AND ($4::boolean IS NULL OR e.paid = $4) \
               AND e.event_date >= $5 AND e.event_date <= $6 \
               AND (NOT $7 OR e.participant_limit = 0 OR \
                    e.confirmed_requests < e.participant_limit) \
             ORDER BY e.event_date \
             OFFSET $8 LIMIT $9"
        );
        sqlx::query_as::<_, EventRecord>(&query)
            .bind(EventState::Published.as_str())
            .bind(filter.text.as_deref())
            .bind(filter.categories.as_deref())
            .bind(filter.paid)
            .bind(filter.range_start)
            .bind(filter.range_end)
            .bind(filter.only_available)
            .bind(filter.offset)
            .bind(filter.limit)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update and return the refreshed record.
    pub async fn apply_patch(
        pool: &PgPool,
        id: DbId,
        patch: &EventPatch,
    ) -> Result<EventRecord, sqlx::Error> {
        sqlx::query(
            "UPDATE events SET \
                 annotation = COALESCE($2, annotation), \
                 category_id = COALESCE($3, category_id), \
                 description = COALESCE($4, description), \
                 event_date = COALESCE($5, event_date), \
                 lat = COALESCE($6, lat), \
                 lon = COALESCE($7, lon), \
                 paid = COALESCE($8, paid), \
                 participant_limit = COALESCE($9, participant_limit), \
                 request_moderation = COALESCE($10, request_moderation), \
                 title = COALESCE($11, title), \
                 state = COALESCE($12, state), \
                 published_on = COALESCE($13, published_on) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(patch.annotation.as_deref())
        .bind(patch.category)
        .bind(patch.description.as_deref())
        .bind(patch.event_date)
        .bind(patch.location.map(|l| l.lat))
        .bind(patch.location.map(|l| l.lon))
        .bind(patch.paid)
        .bind(patch.participant_limit)
        .bind(patch.request_moderation)
        .bind(patch.title.as_deref())
        .bind(patch.state.map(|s| s.as_str()))
        .bind(patch.published_on)
        .execute(pool)
        .await?;

        let query = format!("SELECT {EVENT_COLUMNS} FROM {EVENT_FROM} WHERE e.id = $1");
        sqlx::query_as::<_, EventRecord>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Lock the event row and return its capacity columns. Serializes all
    /// request mutations against the same event.
    pub async fn lock_capacity(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<EventCapacity>, sqlx::Error> {
        sqlx::query_as::<_, EventCapacity>(
            "SELECT id, initiator_id, participant_limit, request_moderation, \
                    confirmed_requests, state \
             FROM events WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(conn)
        .await
    }

    /// Set the confirmed counter; only called while the row is locked.
    pub async fn set_confirmed_count(
        conn: &mut PgConnection,
        id: DbId,
        count: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE events SET confirmed_requests = $2 WHERE id = $1")
            .bind(id)
            .bind(count)
            .execute(conn)
            .await?;
        Ok(())
    }
}
