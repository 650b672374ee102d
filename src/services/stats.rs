//! Catalog statistics service

use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, repository::Repository};

/// Entity counts shown on the home page
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogStats {
    pub books: i64,
    pub authors: i64,
    pub genres: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn catalog_stats(&self) -> AppResult<CatalogStats> {
        Ok(CatalogStats {
            books: self.repository.books.count().await?,
            authors: self.repository.authors.count().await?,
            genres: self.repository.genres.count().await?,
        })
    }
}
