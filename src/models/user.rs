//! User model, registration and JWT claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// Full user model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub is_admin: bool,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Registration request; creates a user and its zero-balance client account
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUser {
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub password_confirm: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email, length(max = 200))]
    pub email: String,
}

impl RegisterUser {
    pub fn validate_fields(&self) -> Result<(), AppError> {
        self.validate()?;
        if self.password != self.password_confirm {
            return Err(AppError::field_validation(
                "password_confirm",
                "passwords do not match",
            ));
        }
        Ok(())
    }
}

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// JWT claims carried by bearer tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: Uuid,
    pub is_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Catalog writes are reserved to administrators
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Administrator rights required".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid_registration() -> RegisterUser {
        RegisterUser {
            username: "reader".to_string(),
            password: "jo34r430d04j4dj3jdj2jd24d".to_string(),
            password_confirm: "jo34r430d04j4dj3jdj2jd24d".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.net".to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(valid_registration().validate_fields().is_ok());
    }

    #[test]
    fn test_short_password_rejected() {
        let mut req = valid_registration();
        req.password = "abc".to_string();
        req.password_confirm = "abc".to_string();
        assert!(req.validate_fields().is_err());
    }

    #[test]
    fn test_password_mismatch_rejected() {
        let mut req = valid_registration();
        req.password_confirm = "something-else-entirely".to_string();
        assert!(req.validate_fields().is_err());
    }

    #[test]
    fn test_claims_round_trip() {
        let now = Utc::now();
        let claims = UserClaims {
            sub: "reader".to_string(),
            user_id: Uuid::new_v4(),
            is_admin: false,
            iat: now.timestamp(),
            exp: (now + Duration::hours(24)).timestamp(),
        };

        let token = claims.create_token("test-secret").unwrap();
        let decoded = UserClaims::from_token(&token, "test-secret").unwrap();
        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.user_id, claims.user_id);
        assert!(!decoded.is_admin);
    }

    #[test]
    fn test_claims_wrong_secret() {
        let now = Utc::now();
        let claims = UserClaims {
            sub: "reader".to_string(),
            user_id: Uuid::new_v4(),
            is_admin: false,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };

        let token = claims.create_token("test-secret").unwrap();
        assert!(UserClaims::from_token(&token, "other-secret").is_err());
    }
}
