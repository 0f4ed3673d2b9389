//! Repository for the `users` table.

use sqlx::PgPool;

use ewm_core::types::DbId;

use crate::models::user::{NewUserRequest, User};

/// Column list for `users` queries.
const USER_COLUMNS: &str = "id, name, email";

/// Provides data access for users.
pub struct UserRepo;

impl UserRepo {
    /// Register a new user. Fails with a unique violation on
    /// `uq_users_email` when the email is already taken.
    pub async fn create(pool: &PgPool, dto: &NewUserRequest) -> Result<User, sqlx::Error> {
        let query =
            format!("INSERT INTO users (name, email) VALUES ($1, $2) RETURNING {USER_COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(&dto.name)
            .bind(&dto.email)
            .fetch_one(pool)
            .await
    }

    /// Find a user by their ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List users, optionally restricted to the given IDs, in ID order.
    pub async fn list(
        pool: &PgPool,
        ids: Option<&[DbId]>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE ($1::bigint[] IS NULL OR id = ANY($1)) \
             ORDER BY id \
             OFFSET $2 LIMIT $3"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(ids)
            .bind(offset)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Whether the user still initiates events, holds participation
    /// requests, or authored comments.
    pub async fn is_referenced(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM events WHERE initiator_id = $1) \
                 OR EXISTS (SELECT 1 FROM requests WHERE requester_id = $1) \
                 OR EXISTS (SELECT 1 FROM comments WHERE author_id = $1)",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Delete a user. Returns the number of rows removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
