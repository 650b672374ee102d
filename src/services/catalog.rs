//! Catalog management service: books, authors and genres

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorQuery, CreateAuthor, UpdateAuthor},
        book::{Book, BookQuery, CreateBook, UpdateBook},
        genre::{CreateGenre, Genre, GenreQuery, UpdateGenre},
    },
    repository::{books::NewBook, Repository},
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // Books

    pub async fn search_books(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        self.repository.books.search(query).await
    }

    pub async fn get_book(&self, id: Uuid) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a book. Field validators run first; a failure aborts the
    /// write before anything touches storage.
    pub async fn create_book(&self, request: &CreateBook) -> AppResult<Book> {
        request.validate_fields()?;

        let book = NewBook {
            title: &request.title,
            description: request.description.as_deref(),
            volume: request.volume,
            book_type: request.parsed_type(),
            year: request.year,
            price: request.price.unwrap_or_default(),
            created: request.created,
            modified: request.modified,
        };
        self.repository.books.create(&book).await
    }

    pub async fn update_book(&self, id: Uuid, request: &UpdateBook) -> AppResult<Book> {
        request.validate_fields()?;

        self.repository
            .books
            .update(
                id,
                request.title.as_deref(),
                request.description.as_deref(),
                request.volume,
                request.parsed_type(),
                request.year,
                request.price,
            )
            .await
    }

    pub async fn delete_book(&self, id: Uuid) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    pub async fn get_book_authors(&self, book_id: Uuid) -> AppResult<Vec<Author>> {
        self.repository.books.get_by_id(book_id).await?;
        self.repository.books.get_authors(book_id).await
    }

    pub async fn get_book_genres(&self, book_id: Uuid) -> AppResult<Vec<Genre>> {
        self.repository.books.get_by_id(book_id).await?;
        self.repository.books.get_genres(book_id).await
    }

    // Authors

    pub async fn search_authors(&self, query: &AuthorQuery) -> AppResult<(Vec<Author>, i64)> {
        self.repository.authors.search(query).await
    }

    pub async fn get_author(&self, id: Uuid) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn create_author(&self, request: &CreateAuthor) -> AppResult<Author> {
        request.validate_fields()?;
        self.repository
            .authors
            .create(&request.full_name, request.created, request.modified)
            .await
    }

    pub async fn update_author(&self, id: Uuid, request: &UpdateAuthor) -> AppResult<Author> {
        use validator::Validate;
        request.validate().map_err(crate::error::AppError::from)?;
        self.repository
            .authors
            .update(id, request.full_name.as_deref())
            .await
    }

    pub async fn delete_author(&self, id: Uuid) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }

    // Genres

    pub async fn search_genres(&self, query: &GenreQuery) -> AppResult<(Vec<Genre>, i64)> {
        self.repository.genres.search(query).await
    }

    pub async fn get_genre(&self, id: Uuid) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await
    }

    pub async fn create_genre(&self, request: &CreateGenre) -> AppResult<Genre> {
        request.validate_fields()?;
        self.repository
            .genres
            .create(
                &request.name,
                request.description.as_deref(),
                request.created,
                request.modified,
            )
            .await
    }

    pub async fn update_genre(&self, id: Uuid, request: &UpdateGenre) -> AppResult<Genre> {
        use validator::Validate;
        request.validate().map_err(crate::error::AppError::from)?;
        self.repository
            .genres
            .update(id, request.name.as_deref(), request.description.as_deref())
            .await
    }

    pub async fn delete_genre(&self, id: Uuid) -> AppResult<()> {
        self.repository.genres.delete(id).await
    }
}
