//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, authors, books, genres, health, ledger, stats};
use crate::error::ErrorResponse;
use crate::models::{
    author::{Author, CreateAuthor, UpdateAuthor},
    book::{Book, BookType, CreateBook, UpdateBook},
    client::{AddFunds, Client, Holding, PurchaseOutcome},
    genre::{CreateGenre, Genre, UpdateGenre},
    user::{LoginRequest, RegisterUser, User},
};
use crate::services::stats::CatalogStats;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblion API",
        version = "0.1.0",
        description = "Library Catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::list_book_authors,
        books::list_book_genres,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        // Ledger
        ledger::buy_page,
        ledger::buy,
        ledger::profile,
        ledger::add_funds,
        // Stats
        stats::get_stats,
    ),
    components(schemas(
        ErrorResponse,
        User,
        RegisterUser,
        LoginRequest,
        auth::LoginResponse,
        Book,
        BookType,
        CreateBook,
        UpdateBook,
        Author,
        CreateAuthor,
        UpdateAuthor,
        Genre,
        CreateGenre,
        UpdateGenre,
        Client,
        Holding,
        AddFunds,
        PurchaseOutcome,
        ledger::BuyPageResponse,
        ledger::PurchaseResponse,
        ledger::ProfileResponse,
        ledger::BalanceResponse,
        CatalogStats,
        health::HealthResponse,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Registration and authentication"),
        (name = "books", description = "Book catalog"),
        (name = "authors", description = "Author catalog"),
        (name = "genres", description = "Genre catalog"),
        (name = "ledger", description = "Purchases and account balance"),
        (name = "stats", description = "Catalog statistics")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
