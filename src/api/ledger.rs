//! Purchase and account endpoints
//!
//! The buy page follows the original flow: an unknown or missing book id
//! redirects to the books listing instead of erroring, and guard failures
//! (insufficient funds, already owned) are ordinary 200 responses with an
//! outcome field.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::client::{AddFunds, Holding, PurchaseOutcome},
};

use super::AuthenticatedUser;

/// Safe landing page for unknown book ids
const BOOKS_LISTING: &str = "/api/v1/books";

/// Buy page query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct BuyQuery {
    /// Book ID
    pub id: Option<String>,
}

impl BuyQuery {
    fn book_id(&self) -> Option<Uuid> {
        self.id.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Purchase state shown on the buy page
#[derive(Serialize, ToSchema)]
pub struct BuyPageResponse {
    pub book_id: Uuid,
    pub title: String,
    pub price: Decimal,
    pub balance: Decimal,
    pub affordable: bool,
    pub owned: bool,
}

/// Result of a purchase attempt
#[derive(Serialize, ToSchema)]
pub struct PurchaseResponse {
    pub outcome: PurchaseOutcome,
    pub book_id: Uuid,
    pub balance: Decimal,
    pub message: String,
}

/// Client profile with balance and holdings
#[derive(Serialize, ToSchema)]
pub struct ProfileResponse {
    pub money: Decimal,
    pub holdings: Vec<Holding>,
}

/// Balance after a fund addition
#[derive(Serialize, ToSchema)]
pub struct BalanceResponse {
    pub money: Decimal,
}

/// Show the purchase state of a book for the authenticated client
#[utoipa::path(
    get,
    path = "/buy",
    tag = "ledger",
    security(("bearer_auth" = [])),
    params(BuyQuery),
    responses(
        (status = 200, description = "Purchase state", body = BuyPageResponse),
        (status = 303, description = "Unknown book id, redirected to the books listing")
    )
)]
pub async fn buy_page(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<BuyQuery>,
) -> AppResult<Response> {
    let Some(book_id) = query.book_id() else {
        return Ok(Redirect::to(BOOKS_LISTING).into_response());
    };

    match state.services.ledger.purchase_state(claims.user_id, book_id).await {
        Ok(purchase_state) => Ok(Json(BuyPageResponse {
            book_id: purchase_state.book.id,
            title: purchase_state.book.title,
            price: purchase_state.book.price,
            balance: purchase_state.balance,
            affordable: purchase_state.affordable,
            owned: purchase_state.owned,
        })
        .into_response()),
        Err(AppError::NotFound(_)) => Ok(Redirect::to(BOOKS_LISTING).into_response()),
        Err(e) => Err(e),
    }
}

/// Attempt to purchase a book for the authenticated client
#[utoipa::path(
    post,
    path = "/buy",
    tag = "ledger",
    security(("bearer_auth" = [])),
    params(BuyQuery),
    responses(
        (status = 200, description = "Purchase outcome", body = PurchaseResponse),
        (status = 303, description = "Unknown book id, redirected to the books listing")
    )
)]
pub async fn buy(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<BuyQuery>,
) -> AppResult<Response> {
    let Some(book_id) = query.book_id() else {
        return Ok(Redirect::to(BOOKS_LISTING).into_response());
    };

    match state.services.ledger.attempt_purchase(claims.user_id, book_id).await {
        Ok((outcome, balance)) => {
            let message = match outcome {
                PurchaseOutcome::Purchased => "Book purchased".to_string(),
                PurchaseOutcome::InsufficientFunds => "Insufficient funds".to_string(),
                PurchaseOutcome::AlreadyOwned => "Book already owned".to_string(),
            };
            Ok(Json(PurchaseResponse {
                outcome,
                book_id,
                balance,
                message,
            })
            .into_response())
        }
        Err(AppError::NotFound(_)) => Ok(Redirect::to(BOOKS_LISTING).into_response()),
        Err(e) => Err(e),
    }
}

/// Profile of the authenticated client: balance and holdings
#[utoipa::path(
    get,
    path = "/profile",
    tag = "ledger",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Client profile", body = ProfileResponse),
        (status = 404, description = "Client account not found")
    )
)]
pub async fn profile(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ProfileResponse>> {
    let (client, holdings) = state.services.ledger.profile(claims.user_id).await?;

    Ok(Json(ProfileResponse {
        money: client.money,
        holdings,
    }))
}

/// Add funds to the authenticated client's balance
#[utoipa::path(
    post,
    path = "/profile/funds",
    tag = "ledger",
    security(("bearer_auth" = [])),
    request_body = AddFunds,
    responses(
        (status = 200, description = "Balance after the addition", body = BalanceResponse),
        (status = 400, description = "Amount must be positive")
    )
)]
pub async fn add_funds(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<AddFunds>,
) -> AppResult<Json<BalanceResponse>> {
    let money = state.services.ledger.add_funds(claims.user_id, &request).await?;
    Ok(Json(BalanceResponse { money }))
}
