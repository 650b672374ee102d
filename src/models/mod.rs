//! Data models for the Biblion catalog

pub mod author;
pub mod book;
pub mod client;
pub mod genre;
pub mod user;

pub use author::Author;
pub use book::{Book, BookType};
pub use client::{Client, Holding, PurchaseOutcome};
pub use genre::Genre;
pub use user::User;
