//! Catalog Store — `PostgreSQL` persistence for products and sellers.

pub mod pg_product_repository;
pub mod pg_seller_repository;

use catalog_core::error::CatalogError;

fn query_error(err: sqlx::Error) -> CatalogError {
    CatalogError::Query(err.to_string())
}

fn page_bounds(offset: u32, limit: u32) -> (i64, i64) {
    (i64::from(offset), i64::from(limit))
}
