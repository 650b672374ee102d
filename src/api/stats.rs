//! Catalog statistics endpoints

use axum::{extract::State, Json};

use crate::{error::AppResult, services::stats::CatalogStats};

use super::AuthenticatedUser;

/// Entity counts for the home page
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Catalog statistics", body = CatalogStats),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<CatalogStats>> {
    let stats = state.services.stats.catalog_stats().await?;
    Ok(Json(stats))
}
