//! Genre model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{error::AppError, validators};

/// Full genre model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Create genre request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGenre {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

impl CreateGenre {
    pub fn validate_fields(&self) -> Result<(), AppError> {
        self.validate()?;
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
}

/// Update genre request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateGenre {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// Genre query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct GenreQuery {
    pub name: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
