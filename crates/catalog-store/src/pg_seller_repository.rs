//! `PostgreSQL` implementation of the `SellerRepository` trait.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use catalog_core::error::CatalogError;
use catalog_core::record::SellerRecord;
use catalog_core::repository::SellerRepository;

use crate::{page_bounds, query_error};

#[derive(Debug, sqlx::FromRow)]
struct SellerRow {
    id_seller: i64,
    uuid: Uuid,
    email: String,
    phone: String,
}

impl From<SellerRow> for SellerRecord {
    fn from(row: SellerRow) -> Self {
        Self {
            seller_id: row.id_seller,
            uuid: row.uuid,
            email: row.email,
            phone: row.phone,
        }
    }
}

/// PostgreSQL-backed seller repository.
#[derive(Debug, Clone)]
pub struct PgSellerRepository {
    pool: PgPool,
}

impl PgSellerRepository {
    /// Creates a new `PgSellerRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SellerRepository for PgSellerRepository {
    #[instrument(skip(self))]
    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<SellerRecord>, CatalogError> {
        let row = sqlx::query_as::<_, SellerRow>(
            "SELECT id_seller, uuid, email, phone FROM seller WHERE uuid = $1",
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(row.map(SellerRecord::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, offset: u32, limit: u32) -> Result<Vec<SellerRecord>, CatalogError> {
        let (offset, limit) = page_bounds(offset, limit);
        let rows = sqlx::query_as::<_, SellerRow>(
            "SELECT id_seller, uuid, email, phone FROM seller ORDER BY id_seller LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(rows.into_iter().map(SellerRecord::from).collect())
    }
}
