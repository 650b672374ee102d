//! Client account model and purchase ledger types
//!
//! A client is the library account attached one-to-one to a user: it holds
//! the monetary balance and the set of purchased books. The purchase guard
//! decision lives here as a pure function so the ledger rules can be tested
//! without a database.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;

/// Client account from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Client {
    pub user_id: Uuid,
    /// Balance, fixed-point with 2 decimal places; never negative
    pub money: Decimal,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// A confirmed purchase relation between a client and a book
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Holding {
    pub book_id: Uuid,
    pub title: String,
    pub price: Decimal,
    /// When the purchase was made
    pub acquired: DateTime<Utc>,
}

/// Outcome of a purchase attempt.
///
/// Guard failures are normal outcomes reported to the caller, not errors:
/// no state changes when a guard fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOutcome {
    Purchased,
    InsufficientFunds,
    AlreadyOwned,
}

impl PurchaseOutcome {
    /// The purchase guard: a purchase succeeds iff the book is not already
    /// held and the balance covers the price. The ownership check comes
    /// first so a repeated request reports "already owned" regardless of
    /// the remaining balance.
    pub fn decide(balance: Decimal, price: Decimal, already_owned: bool) -> Self {
        if already_owned {
            PurchaseOutcome::AlreadyOwned
        } else if balance < price {
            PurchaseOutcome::InsufficientFunds
        } else {
            PurchaseOutcome::Purchased
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseOutcome::Purchased => "purchased",
            PurchaseOutcome::InsufficientFunds => "insufficient_funds",
            PurchaseOutcome::AlreadyOwned => "already_owned",
        }
    }
}

/// Add-funds request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddFunds {
    pub amount: Decimal,
}

impl AddFunds {
    /// Zero and negative amounts are rejected with a reported error, never
    /// silently ignored.
    pub fn validate_fields(&self) -> Result<(), AppError> {
        if self.amount <= Decimal::ZERO {
            return Err(AppError::field_validation(
                "amount",
                "amount must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[test]
    fn test_purchase_succeeds_when_affordable() {
        // balance 1.00, price 1.00
        assert_eq!(
            PurchaseOutcome::decide(dec(100), dec(100), false),
            PurchaseOutcome::Purchased
        );
    }

    #[test]
    fn test_purchase_fails_when_broke() {
        // balance 0.00, price 1.00
        assert_eq!(
            PurchaseOutcome::decide(dec(0), dec(100), false),
            PurchaseOutcome::InsufficientFunds
        );
    }

    #[test]
    fn test_repeat_purchase_reports_already_owned() {
        assert_eq!(
            PurchaseOutcome::decide(dec(100), dec(100), true),
            PurchaseOutcome::AlreadyOwned
        );
    }

    #[test]
    fn test_already_owned_wins_over_insufficient_funds() {
        assert_eq!(
            PurchaseOutcome::decide(dec(0), dec(100), true),
            PurchaseOutcome::AlreadyOwned
        );
    }

    #[test]
    fn test_free_book_is_affordable() {
        assert_eq!(
            PurchaseOutcome::decide(dec(0), dec(0), false),
            PurchaseOutcome::Purchased
        );
    }

    #[test]
    fn test_add_funds_rejects_non_positive() {
        assert!(AddFunds { amount: dec(-100) }.validate_fields().is_err());
        assert!(AddFunds { amount: Decimal::ZERO }.validate_fields().is_err());
        assert!(AddFunds { amount: dec(1) }.validate_fields().is_ok());
    }
}
