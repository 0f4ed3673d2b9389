//! Repository for the `categories` table.

use sqlx::PgPool;

use ewm_core::types::DbId;

use crate::models::category::{Category, NewCategoryDto};

/// Column list for `categories` queries.
const CATEGORY_COLUMNS: &str = "id, name";

/// Provides data access for event categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Create a category. Fails with a unique violation on
    /// `uq_categories_name` when the name is already taken.
    pub async fn create(pool: &PgPool, dto: &NewCategoryDto) -> Result<Category, sqlx::Error> {
        let query =
            format!("INSERT INTO categories (name) VALUES ($1) RETURNING {CATEGORY_COLUMNS}");
        sqlx::query_as::<_, Category>(&query)
            .bind(&dto.name)
            .fetch_one(pool)
            .await
    }

    /// Rename a category.
    pub async fn rename(
        pool: &PgPool,
        id: DbId,
        dto: &NewCategoryDto,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET name = $2 WHERE id = $1 RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&dto.name)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List categories in ID order.
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY id OFFSET $1 LIMIT $2"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(offset)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Whether any event still references the category.
    pub async fn has_events(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM events WHERE category_id = $1)",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Delete a category. Returns the number of rows removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
