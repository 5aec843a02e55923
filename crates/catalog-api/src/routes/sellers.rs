//! Routes for sellers. These are the targets of v2 self-links.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use catalog_products::application::query_handlers;
use catalog_products::domain::representation::SellerView;
use tracing::instrument;
use uuid::Uuid;

use super::products::PageQuery;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/v1/sellers
#[instrument(skip(state))]
async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<SellerView>>, ApiError> {
    let offset = query_handlers::page_offset(query.page)?;
    let sellers =
        query_handlers::list_sellers(offset, query_handlers::PAGE_SIZE, &*state.sellers).await?;
    Ok(Json(sellers))
}

/// GET /api/v1/sellers/{uuid}
#[instrument(skip(state))]
async fn get_seller(
    State(state): State<AppState>,
    Path(seller_uuid): Path<Uuid>,
) -> Result<Json<SellerView>, ApiError> {
    let seller = query_handlers::find_seller(seller_uuid, &*state.sellers).await?;
    Ok(Json(seller))
}

/// Returns the seller router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sellers", get(list))
        .route("/sellers/{uuid}", get(get_seller))
}
