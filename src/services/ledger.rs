//! Account ledger service
//!
//! Enforces that a client can only acquire a book they can afford, exactly
//! once, atomically. Guard failures are reported as outcomes, never raised
//! as errors.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        book::Book,
        client::{AddFunds, Client, Holding, PurchaseOutcome},
    },
    repository::Repository,
};

/// Purchase state of one book for one client, as shown on the buy page
#[derive(Debug)]
pub struct PurchaseState {
    pub book: Book,
    pub balance: Decimal,
    pub affordable: bool,
    pub owned: bool,
}

#[derive(Clone)]
pub struct LedgerService {
    repository: Repository,
}

impl LedgerService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Purchase state for the buy page: price, balance, affordability and
    /// ownership for the authenticated client.
    pub async fn purchase_state(&self, user_id: Uuid, book_id: Uuid) -> AppResult<PurchaseState> {
        let book = self.repository.books.get_by_id(book_id).await?;
        let client = self.repository.clients.get_by_user_id(user_id).await?;
        let owned = self.repository.clients.owns_book(user_id, book_id).await?;

        Ok(PurchaseState {
            affordable: client.money >= book.price,
            balance: client.money,
            owned,
            book,
        })
    }

    /// Attempt to purchase a book for the authenticated client.
    ///
    /// Returns the outcome and the balance after the operation. Repeating
    /// a successful purchase reports `AlreadyOwned` and changes nothing.
    pub async fn attempt_purchase(
        &self,
        user_id: Uuid,
        book_id: Uuid,
    ) -> AppResult<(PurchaseOutcome, Decimal)> {
        let book = self.repository.books.get_by_id(book_id).await?;
        // Resolve the client before entering the transaction so a missing
        // account surfaces as NotFound rather than a guard failure.
        let client = self.repository.clients.get_by_user_id(user_id).await?;

        self.repository.clients.purchase(client.user_id, &book).await
    }

    /// Credit the client balance. Zero and negative amounts are rejected
    /// as validation errors and leave the balance unchanged.
    pub async fn add_funds(&self, user_id: Uuid, request: &AddFunds) -> AppResult<Decimal> {
        request.validate_fields()?;
        self.repository.clients.add_funds(user_id, request.amount).await
    }

    /// Client account with its holdings, for the profile page
    pub async fn profile(&self, user_id: Uuid) -> AppResult<(Client, Vec<Holding>)> {
        let client = self.repository.clients.get_by_user_id(user_id).await?;
        let holdings = self.repository.clients.get_holdings(user_id).await?;
        Ok((client, holdings))
    }
}
