//! Business logic services

pub mod catalog;
pub mod ledger;
pub mod stats;
pub mod users;

use crate::{config::AuthConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub catalog: catalog::CatalogService,
    pub ledger: ledger::LedgerService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> AppResult<Self> {
        Ok(Self {
            users: users::UsersService::new(repository.clone(), auth_config),
            catalog: catalog::CatalogService::new(repository.clone()),
            ledger: ledger::LedgerService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
        })
    }
}
