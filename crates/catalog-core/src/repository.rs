//! Repository abstractions.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogError;
use crate::record::{ProductRecord, SellerRecord};

/// Row-level access to stored products.
///
/// Implementations return raw records; mapping into a public representation
/// happens in the product context so that every representation shares the
/// same statements.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Load a single product by public UUID.
    ///
    /// Returns `CatalogError::NotFound` when no row matches.
    async fn find_by_uuid(&self, uuid: Uuid) -> Result<ProductRecord, CatalogError>;

    /// Load at most `limit` products starting at `offset`.
    ///
    /// Ordering is stable across calls so consecutive pages are disjoint.
    async fn list(&self, offset: u32, limit: u32) -> Result<Vec<ProductRecord>, CatalogError>;

    /// Persist a new product. The seller is resolved from
    /// `product.seller_uuid` in the same statement; an unknown seller yields
    /// `CatalogError::InvalidReference`.
    async fn insert(&self, product: &ProductRecord) -> Result<(), CatalogError>;

    /// Replace name, brand and stock of an existing product in one atomic
    /// statement. Seller linkage is never touched.
    async fn update(&self, product: &ProductRecord) -> Result<(), CatalogError>;

    /// Remove a product. Removing an absent UUID is not an error.
    async fn delete(&self, uuid: Uuid) -> Result<(), CatalogError>;
}

/// Read access to stored sellers.
#[async_trait]
pub trait SellerRepository: Send + Sync {
    /// Load a seller by public UUID. A missing row is `Ok(None)`.
    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<SellerRecord>, CatalogError>;

    /// Load at most `limit` sellers starting at `offset`.
    async fn list(&self, offset: u32, limit: u32) -> Result<Vec<SellerRecord>, CatalogError>;
}
