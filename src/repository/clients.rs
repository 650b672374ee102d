//! Clients repository: account balances and the purchase ledger
//!
//! The purchase runs as a single transaction with the client row locked,
//! so two concurrent attempts for the same client/book pair cannot both
//! pass the guards. The unique constraint on book_clients backstops the
//! ownership check.

use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::Book,
        client::{Client, Holding, PurchaseOutcome},
    },
};

#[derive(Clone)]
pub struct ClientsRepository {
    pool: Pool<Postgres>,
}

impl ClientsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a client account by its owning user id
    pub async fn get_by_user_id(&self, user_id: Uuid) -> AppResult<Client> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Client for user {} not found", user_id)))
    }

    /// List the client's holdings with book details
    pub async fn get_holdings(&self, client_id: Uuid) -> AppResult<Vec<Holding>> {
        let holdings = sqlx::query_as::<_, Holding>(
            r#"
            SELECT b.id as book_id, b.title, b.price, bc.created as acquired
            FROM book_clients bc
            JOIN books b ON b.id = bc.book_id
            WHERE bc.client_id = $1
            ORDER BY bc.created DESC
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(holdings)
    }

    /// Whether the client already holds the given book
    pub async fn owns_book(&self, client_id: Uuid, book_id: Uuid) -> AppResult<bool> {
        let owned: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM book_clients WHERE client_id = $1 AND book_id = $2)",
        )
        .bind(client_id)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(owned)
    }

    /// Attempt a purchase: guard checks and writes in one transaction.
    ///
    /// Returns the outcome and the balance after the operation. On a guard
    /// failure the transaction is rolled back and the balance is unchanged.
    pub async fn purchase(
        &self,
        client_id: Uuid,
        book: &Book,
    ) -> AppResult<(PurchaseOutcome, Decimal)> {
        let mut tx = self.pool.begin().await?;

        // Lock the client row so concurrent purchases serialize.
        let balance: Decimal = sqlx::query_scalar(
            "SELECT money FROM clients WHERE user_id = $1 FOR UPDATE",
        )
        .bind(client_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Client for user {} not found", client_id)))?;

        let already_owned: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM book_clients WHERE client_id = $1 AND book_id = $2)",
        )
        .bind(client_id)
        .bind(book.id)
        .fetch_one(&mut *tx)
        .await?;

        let outcome = PurchaseOutcome::decide(balance, book.price, already_owned);
        if outcome != PurchaseOutcome::Purchased {
            tx.rollback().await?;
            return Ok((outcome, balance));
        }

        sqlx::query(
            "INSERT INTO book_clients (id, book_id, client_id) VALUES ($1, $2, $3)",
        )
        .bind(Uuid::new_v4())
        .bind(book.id)
        .bind(client_id)
        .execute(&mut *tx)
        .await?;

        let new_balance: Decimal = sqlx::query_scalar(
            r#"
            UPDATE clients
            SET money = money - $2, modified = now()
            WHERE user_id = $1
            RETURNING money
            "#,
        )
        .bind(client_id)
        .bind(book.price)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            client_id = %client_id,
            book_id = %book.id,
            price = %book.price,
            "purchase committed"
        );

        Ok((PurchaseOutcome::Purchased, new_balance))
    }

    /// Credit the client balance. The amount must already be validated as
    /// strictly positive by the caller.
    pub async fn add_funds(&self, client_id: Uuid, amount: Decimal) -> AppResult<Decimal> {
        let new_balance: Option<Decimal> = sqlx::query_scalar(
            r#"
            UPDATE clients
            SET money = money + $2, modified = now()
            WHERE user_id = $1
            RETURNING money
            "#,
        )
        .bind(client_id)
        .bind(amount)
        .fetch_optional(&self.pool)
        .await?;

        new_balance
            .ok_or_else(|| AppError::NotFound(format!("Client for user {} not found", client_id)))
    }
}
