//! Query handlers for the product context.
//!
//! Handlers load raw records and map them into the representation chosen by
//! the caller's type parameter. Link decoration happens inside the mapping,
//! for single reads and listings alike.

use catalog_core::error::CatalogError;
use catalog_core::repository::{ProductRepository, SellerRepository};
use uuid::Uuid;

use crate::domain::representation::{ProductShape, SellerView};

/// Number of entries per listing page.
pub const PAGE_SIZE: u32 = 10;

/// Converts a 1-based page number into a row offset.
///
/// # Errors
///
/// Returns `CatalogError::Validation` if `page` is zero or the offset does
/// not fit in a `u32`.
pub fn page_offset(page: u32) -> Result<u32, CatalogError> {
    if page == 0 {
        return Err(CatalogError::Validation("page must be at least 1".into()));
    }
    (page - 1)
        .checked_mul(PAGE_SIZE)
        .ok_or_else(|| CatalogError::Validation(format!("page {page} is out of range")))
}

/// Retrieves one product in the representation `S`.
///
/// # Errors
///
/// Returns `CatalogError::NotFound` if no product has the UUID.
/// Returns `CatalogError::Query` if the datastore fails.
pub async fn find_product<S: ProductShape>(
    uuid: Uuid,
    context: &S::Context,
    repo: &dyn ProductRepository,
) -> Result<S, CatalogError> {
    let record = repo.find_by_uuid(uuid).await?;
    Ok(S::from_record(record, context))
}

/// Retrieves at most `limit` products starting at `offset`, in the
/// representation `S`.
///
/// # Errors
///
/// Returns `CatalogError::Query` if the datastore fails.
pub async fn list_products<S: ProductShape>(
    offset: u32,
    limit: u32,
    context: &S::Context,
    repo: &dyn ProductRepository,
) -> Result<Vec<S>, CatalogError> {
    let records = repo.list(offset, limit).await?;
    Ok(records
        .into_iter()
        .map(|record| S::from_record(record, context))
        .collect())
}

/// Retrieves one seller.
///
/// # Errors
///
/// Returns `CatalogError::NotFound` if no seller has the UUID.
/// Returns `CatalogError::Query` if the datastore fails.
pub async fn find_seller(
    uuid: Uuid,
    repo: &dyn SellerRepository,
) -> Result<SellerView, CatalogError> {
    repo.find_by_uuid(uuid)
        .await?
        .map(SellerView::from)
        .ok_or(CatalogError::NotFound(uuid))
}

/// Retrieves at most `limit` sellers starting at `offset`.
///
/// # Errors
///
/// Returns `CatalogError::Query` if the datastore fails.
pub async fn list_sellers(
    offset: u32,
    limit: u32,
    repo: &dyn SellerRepository,
) -> Result<Vec<SellerView>, CatalogError> {
    let records = repo.list(offset, limit).await?;
    Ok(records.into_iter().map(SellerView::from).collect())
}
