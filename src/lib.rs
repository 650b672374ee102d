//! Biblion Library Catalog Server
//!
//! A Rust implementation of the Biblion library catalog, providing a REST
//! JSON API for managing books, authors, genres and client accounts,
//! including the purchase ledger.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validators;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
