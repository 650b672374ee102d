//! Genres repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::genre::{Genre, GenreQuery},
};

#[derive(Clone)]
pub struct GenresRepository {
    pool: Pool<Postgres>,
}

impl GenresRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get genre by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Genre> {
        sqlx::query_as::<_, Genre>("SELECT * FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Genre with id {} not found", id)))
    }

    /// Search genres with optional name filter and pagination
    pub async fn search(&self, query: &GenreQuery) -> AppResult<(Vec<Genre>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
        let pattern = query
            .name
            .as_deref()
            .map(|n| format!("%{}%", n))
            .unwrap_or_else(|| "%".to_string());

        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT * FROM genres
            WHERE name ILIKE $1
            ORDER BY name
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres WHERE name ILIKE $1")
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await?;

        Ok((genres, total))
    }

    /// Create a new genre
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        created: Option<DateTime<Utc>>,
        modified: Option<DateTime<Utc>>,
    ) -> AppResult<Genre> {
        let genre = sqlx::query_as::<_, Genre>(
            r#"
            INSERT INTO genres (id, name, description, created, modified)
            VALUES ($1, $2, $3, COALESCE($4, now()), COALESCE($5, now()))
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(created)
        .bind(modified)
        .fetch_one(&self.pool)
        .await?;

        Ok(genre)
    }

    /// Update a genre
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<Genre> {
        sqlx::query_as::<_, Genre>(
            r#"
            UPDATE genres
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                modified = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Genre with id {} not found", id)))
    }

    /// Delete a genre
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Genre with id {} not found", id)));
        }
        Ok(())
    }

    /// Total number of genres
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
