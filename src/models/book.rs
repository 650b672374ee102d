//! Book model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{error::AppError, validators};

pub const NAMES_MAX_LENGTH: u64 = 100;
pub const DESCRIPTION_MAX_LENGTH: u64 = 1000;

/// The fixed enumeration of catalog entry types
pub const BOOK_TYPES: &[&str] = &["book", "magazine"];

/// Catalog entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookType {
    Book,
    Magazine,
}

impl BookType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookType::Book => "book",
            BookType::Magazine => "magazine",
        }
    }
}

impl std::fmt::Display for BookType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "book" => Ok(BookType::Book),
            "magazine" => Ok(BookType::Magazine),
            _ => Err(format!("Invalid book type: {}", s)),
        }
    }
}

// SQLx conversion for BookType (stored as text)
impl sqlx::Type<Postgres> for BookType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for BookType {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for BookType {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Full book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Page count
    pub volume: i32,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub book_type: Option<BookType>,
    pub year: Option<i32>,
    pub price: Decimal,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub volume: i32,
    #[serde(rename = "type")]
    pub book_type: Option<String>,
    pub year: Option<i32>,
    pub price: Option<Decimal>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

impl CreateBook {
    /// Run field validators; any failure aborts the write.
    pub fn validate_fields(&self) -> Result<(), AppError> {
        self.validate()?;
        validators::check_non_negative_int(self.volume)
            .map_err(|e| AppError::field_validation("volume", e.to_string()))?;
        if let Some(price) = self.price {
            validators::check_non_negative(price)
                .map_err(|e| AppError::field_validation("price", e.to_string()))?;
        }
        if let Some(year) = self.year {
            validators::check_year_not_future(year)
                .map_err(|e| AppError::field_validation("year", e.to_string()))?;
        }
        if let Some(ref book_type) = self.book_type {
            validators::check_known_type(book_type, BOOK_TYPES)
                .map_err(|e| AppError::field_validation("type", e.to_string()))?;
        }
        if let Some(created) = self.created {
            validators::check_not_future(created)
                .map_err(|e| AppError::field_validation("created", e.to_string()))?;
        }
        if let Some(modified) = self.modified {
            validators::check_not_future(modified)
                .map_err(|e| AppError::field_validation("modified", e.to_string()))?;
        }
        Ok(())
    }

    /// Parsed book type, after `validate_fields` has accepted it.
    pub fn parsed_type(&self) -> Option<BookType> {
        self.book_type.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Update book request (all fields optional)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub volume: Option<i32>,
    #[serde(rename = "type")]
    pub book_type: Option<String>,
    pub year: Option<i32>,
    pub price: Option<Decimal>,
}

impl UpdateBook {
    pub fn validate_fields(&self) -> Result<(), AppError> {
        self.validate()?;
        if let Some(volume) = self.volume {
            validators::check_non_negative_int(volume)
                .map_err(|e| AppError::field_validation("volume", e.to_string()))?;
        }
        if let Some(price) = self.price {
            validators::check_non_negative(price)
                .map_err(|e| AppError::field_validation("price", e.to_string()))?;
        }
        if let Some(year) = self.year {
            validators::check_year_not_future(year)
                .map_err(|e| AppError::field_validation("year", e.to_string()))?;
        }
        if let Some(ref book_type) = self.book_type {
            validators::check_known_type(book_type, BOOK_TYPES)
                .map_err(|e| AppError::field_validation("type", e.to_string()))?;
        }
        Ok(())
    }

    pub fn parsed_type(&self) -> Option<BookType> {
        self.book_type.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Book query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    pub title: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration};

    fn base_request() -> CreateBook {
        CreateBook {
            title: "A".to_string(),
            description: None,
            volume: 100,
            book_type: Some("book".to_string()),
            year: None,
            price: None,
            created: None,
            modified: None,
        }
    }

    #[test]
    fn test_valid_create() {
        assert!(base_request().validate_fields().is_ok());
    }

    #[test]
    fn test_rejects_unknown_type() {
        let mut req = base_request();
        req.book_type = Some("scroll".to_string());
        assert!(req.validate_fields().is_err());
    }

    #[test]
    fn test_rejects_negative_volume() {
        let mut req = base_request();
        req.volume = -1;
        assert!(req.validate_fields().is_err());
    }

    #[test]
    fn test_rejects_negative_price() {
        let mut req = base_request();
        req.price = Some(Decimal::new(-100, 2));
        assert!(req.validate_fields().is_err());
    }

    #[test]
    fn test_rejects_future_year() {
        let mut req = base_request();
        req.year = Some(Utc::now().year() + 1);
        assert!(req.validate_fields().is_err());
    }

    #[test]
    fn test_rejects_future_created() {
        let mut req = base_request();
        req.created = Some(Utc::now() + Duration::days(1));
        assert!(req.validate_fields().is_err());
    }

    #[test]
    fn test_type_parsing() {
        assert_eq!("book".parse::<BookType>().unwrap(), BookType::Book);
        assert_eq!("Magazine".parse::<BookType>().unwrap(), BookType::Magazine);
        assert!("scroll".parse::<BookType>().is_err());
    }
}
