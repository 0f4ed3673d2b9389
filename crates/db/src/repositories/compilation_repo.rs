//! Repository for the `compilations` table and its event membership.

use sqlx::PgPool;

use ewm_core::types::DbId;

use crate::models::compilation::{Compilation, NewCompilationDto, UpdateCompilationRequest};

/// Column list for `compilations` queries.
const COMPILATION_COLUMNS: &str = "id, title, pinned";

/// Provides data access for compilations.
pub struct CompilationRepo;

impl CompilationRepo {
    /// Create a compilation together with its event membership.
    pub async fn create(
        pool: &PgPool,
        dto: &NewCompilationDto,
    ) -> Result<Compilation, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "INSERT INTO compilations (title, pinned) VALUES ($1, $2) \
             RETURNING {COMPILATION_COLUMNS}"
        );
        let compilation = sqlx::query_as::<_, Compilation>(&query)
            .bind(&dto.title)
            .bind(dto.pinned)
            .fetch_one(&mut *tx)
            .await?;
        if !dto.events.is_empty() {
            sqlx::query(
                "INSERT INTO compilation_events (compilation_id, event_id) \
                 SELECT $1, unnest($2::bigint[])",
            )
            .bind(compilation.id)
            .bind(&dto.events)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(compilation)
    }

    /// Partially update a compilation. A supplied event list replaces the
    /// membership wholesale.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateCompilationRequest,
    ) -> Result<Option<Compilation>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "UPDATE compilations SET \
                 title = COALESCE($2, title), \
                 pinned = COALESCE($3, pinned) \
             WHERE id = $1 \
             RETURNING {COMPILATION_COLUMNS}"
        );
        let compilation = sqlx::query_as::<_, Compilation>(&query)
            .bind(id)
            .bind(dto.title.as_deref())
            .bind(dto.pinned)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(compilation) = compilation else {
            tx.rollback().await?;
            return Ok(None);
        };
        if let Some(events) = &dto.events {
            sqlx::query("DELETE FROM compilation_events WHERE compilation_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            if !events.is_empty() {
                sqlx::query(
                    "INSERT INTO compilation_events (compilation_id, event_id) \
                     SELECT $1, unnest($2::bigint[])",
                )
                .bind(id)
                .bind(events)
                .execute(&mut *tx)
                .await?;
            }
        }
        tx.commit().await?;
        Ok(Some(compilation))
    }

    /// Find a compilation by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Compilation>, sqlx::Error> {
        let query = format!("SELECT {COMPILATION_COLUMNS} FROM compilations WHERE id = $1");
        sqlx::query_as::<_, Compilation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List compilations, optionally filtered by the pinned flag.
    pub async fn list(
        pool: &PgPool,
        pinned: Option<bool>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Compilation>, sqlx::Error> {
        let query = format!(
            "SELECT {COMPILATION_COLUMNS} FROM compilations \
             WHERE ($1::boolean IS NULL OR pinned = $1) \
             ORDER BY id \
             OFFSET $2 LIMIT $3"
        );
        sqlx::query_as::<_, Compilation>(&query)
            .bind(pinned)
            .bind(offset)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// IDs of the events in a compilation, ascending.
    pub async fn event_ids(pool: &PgPool, id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT event_id FROM compilation_events WHERE compilation_id = $1 ORDER BY event_id",
        )
        .bind(id)
        .fetch_all(pool)
        .await
    }

    /// Delete a compilation. Returns the number of rows removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM compilations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
