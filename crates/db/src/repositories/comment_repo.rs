//! Repository for the `comments` table.

use sqlx::PgPool;

use ewm_core::comment::CommentStatus;
use ewm_core::types::{DbId, Timestamp};

use crate::models::comment::{AdminCommentFilter, CommentRecord};

/// Column list for joined `comments` queries.
const COMMENT_COLUMNS: &str = "\
    cm.id, cm.text, cm.event_id, cm.author_id, u.name AS author_name, \
    cm.created_on, cm.status";

/// Join clause shared by every comment query.
const COMMENT_FROM: &str = "comments cm JOIN users u ON u.id = cm.author_id";

/// Provides data access for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment and return the joined record.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        author_id: DbId,
        text: &str,
        created_on: Timestamp,
    ) -> Result<CommentRecord, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO comments (text, event_id, author_id, created_on, status) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(text)
        .bind(event_id)
        .bind(author_id)
        .bind(created_on)
        .bind(CommentStatus::Active.as_str())
        .fetch_one(pool)
        .await?;
        let query = format!("SELECT {COMMENT_COLUMNS} FROM {COMMENT_FROM} WHERE cm.id = $1");
        sqlx::query_as::<_, CommentRecord>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by its ID.
    pub async fn find_record(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CommentRecord>, sqlx::Error> {
        let query = format!("SELECT {COMMENT_COLUMNS} FROM {COMMENT_FROM} WHERE cm.id = $1");
        sqlx::query_as::<_, CommentRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a comment's text and return the refreshed record.
    pub async fn update_text(
        pool: &PgPool,
        id: DbId,
        text: &str,
    ) -> Result<CommentRecord, sqlx::Error> {
        sqlx::query("UPDATE comments SET text = $2 WHERE id = $1")
            .bind(id)
            .bind(text)
            .execute(pool)
            .await?;
        let query = format!("SELECT {COMMENT_COLUMNS} FROM {COMMENT_FROM} WHERE cm.id = $1");
        sqlx::query_as::<_, CommentRecord>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Hard-delete a comment. Returns the number of rows removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Hide a comment without removing the row.
    pub async fn hide(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE comments SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(CommentStatus::HiddenByAdmin.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// List a user's own comments, optionally narrowed to one event,
    /// newest first.
    pub async fn list_by_author(
        pool: &PgPool,
        author_id: DbId,
        event_id: Option<DbId>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<CommentRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COMMENT_COLUMNS} FROM {COMMENT_FROM} \
             WHERE cm.author_id = $1 \
               AND ($2::bigint IS NULL OR cm.event_id = $2) \
             ORDER BY cm.created_on DESC \
             OFFSET $3 LIMIT $4"
        );
        sqlx::query_as::<_, CommentRecord>(&query)
            .bind(author_id)
            .bind(event_id)
            .bind(offset)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// List the visible comments of an event, newest first.
    pub async fn list_visible_for_event(
        pool: &PgPool,
        event_id: DbId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<CommentRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COMMENT_COLUMNS} FROM {COMMENT_FROM} \
             WHERE cm.event_id = $1 AND cm.status = $2 \
             ORDER BY cm.created_on DESC \
             OFFSET $3 LIMIT $4"
        );
        sqlx::query_as::<_, CommentRecord>(&query)
            .bind(event_id)
            .bind(CommentStatus::Active.as_str())
            .bind(offset)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Admin search over visible comments with NULL-guarded filters,
    /// ordered by creation time in the requested direction.
    pub async fn admin_search(
        pool: &PgPool,
        filter: &AdminCommentFilter,
    ) -> Result<Vec<CommentRecord>, sqlx::Error> {
        let direction = filter.sort.sql();
        let query = format!(
            "SELECT {COMMENT_COLUMNS} FROM {COMMENT_FROM} \
             WHERE cm.status = $1 \
               AND ($2::bigint[] IS NULL OR cm.author_id = ANY($2)) \
               AND ($3::bigint[] IS NULL OR cm.event_id = ANY($3)) \
               AND ($4::bigint[] IS NULL OR cm.id = ANY($4)) \
               AND ($5::text IS NULL OR cm.text ILIKE '%' || $5 || '%') \
               AND cm.created_on >= $6 AND cm.created_on <= $7 \
             ORDER BY cm.created_on {direction} \
             OFFSET $8 LIMIT $9"
        );
        sqlx::query_as::<_, CommentRecord>(&query)
            .bind(CommentStatus::Active.as_str())
            .bind(filter.user_ids.as_deref())
            .bind(filter.event_ids.as_deref())
            .bind(filter.comment_ids.as_deref())
            .bind(filter.text.as_deref())
            .bind(filter.range_start)
            .bind(filter.range_end)
            .bind(filter.offset)
            .bind(filter.limit)
            .fetch_all(pool)
            .await
    }
}
