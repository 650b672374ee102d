//! Books repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookQuery, BookType},
        genre::Genre,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

pub struct NewBook<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub volume: i32,
    pub book_type: Option<BookType>,
    pub year: Option<i32>,
    pub price: rust_decimal::Decimal,
    pub created: Option<chrono::DateTime<chrono::Utc>>,
    pub modified: Option<chrono::DateTime<chrono::Utc>>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Search books with optional title filter and pagination
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
        let pattern = query
            .title
            .as_deref()
            .map(|t| format!("%{}%", t))
            .unwrap_or_else(|| "%".to_string());

        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT * FROM books
            WHERE title ILIKE $1
            ORDER BY title, type, year
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE title ILIKE $1")
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await?;

        Ok((books, total))
    }

    /// Create a new book
    pub async fn create(&self, book: &NewBook<'_>) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, title, description, volume, type, year, price, created, modified)
            VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, now()), COALESCE($9, now()))
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(book.title)
        .bind(book.description)
        .bind(book.volume)
        .bind(book.book_type)
        .bind(book.year)
        .bind(book.price)
        .bind(book.created)
        .bind(book.modified)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update a book; unset fields keep their current values
    pub async fn update(
        &self,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        volume: Option<i32>,
        book_type: Option<BookType>,
        year: Option<i32>,
        price: Option<rust_decimal::Decimal>,
    ) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                volume = COALESCE($4, volume),
                type = COALESCE($5, type),
                year = COALESCE($6, year),
                price = COALESCE($7, price),
                modified = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(volume)
        .bind(book_type)
        .bind(year)
        .bind(price)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Delete a book
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }

    /// Authors of a book
    pub async fn get_authors(&self, book_id: Uuid) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT a.* FROM authors a
            JOIN book_authors ba ON ba.author_id = a.id
            WHERE ba.book_id = $1
            ORDER BY a.full_name
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    /// Genres of a book
    pub async fn get_genres(&self, book_id: Uuid) -> AppResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.* FROM genres g
            JOIN book_genres bg ON bg.genre_id = g.id
            WHERE bg.book_id = $1
            ORDER BY g.name
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(genres)
    }

    /// Total number of books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
