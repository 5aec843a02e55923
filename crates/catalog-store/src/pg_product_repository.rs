//! `PostgreSQL` implementation of the `ProductRepository` trait.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use catalog_core::error::CatalogError;
use catalog_core::record::ProductRecord;
use catalog_core::repository::ProductRepository;

use crate::{page_bounds, query_error};

const SELECT_PRODUCT: &str = r"
SELECT p.id_product, p.uuid, p.name, p.brand, p.stock, s.uuid AS seller_uuid
FROM product p
INNER JOIN seller s ON s.id_seller = p.fk_seller
";

/// A product row joined with its seller's UUID.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id_product: i64,
    uuid: Uuid,
    name: String,
    brand: String,
    stock: i32,
    seller_uuid: Uuid,
}

impl TryFrom<ProductRow> for ProductRecord {
    type Error = CatalogError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let stock = u32::try_from(row.stock).map_err(|_| {
            CatalogError::Query(format!("negative stock stored for product {}", row.uuid))
        })?;
        Ok(Self {
            product_id: row.id_product,
            uuid: row.uuid,
            name: row.name,
            brand: row.brand,
            stock,
            seller_uuid: row.seller_uuid,
        })
    }
}

fn stock_column(product: &ProductRecord) -> Result<i32, CatalogError> {
    i32::try_from(product.stock).map_err(|_| {
        CatalogError::Validation(format!("stock {} exceeds storage range", product.stock))
    })
}

/// PostgreSQL-backed product repository.
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Creates a new `PgProductRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    #[instrument(skip(self))]
    async fn find_by_uuid(&self, uuid: Uuid) -> Result<ProductRecord, CatalogError> {
        let sql = format!("{SELECT_PRODUCT} WHERE p.uuid = $1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?
            .ok_or(CatalogError::NotFound(uuid))?;

        ProductRecord::try_from(row)
    }

    #[instrument(skip(self))]
    async fn list(&self, offset: u32, limit: u32) -> Result<Vec<ProductRecord>, CatalogError> {
        let (offset, limit) = page_bounds(offset, limit);
        let sql = format!("{SELECT_PRODUCT} ORDER BY p.id_product LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        rows.into_iter().map(ProductRecord::try_from).collect()
    }

    #[instrument(skip(self, product), fields(product_uuid = %product.uuid))]
    async fn insert(&self, product: &ProductRecord) -> Result<(), CatalogError> {
        let result = sqlx::query(
            r"
            INSERT INTO product (uuid, name, brand, stock, fk_seller)
            SELECT $1, $2, $3, $4, s.id_seller FROM seller s WHERE s.uuid = $5
            ",
        )
        .bind(product.uuid)
        .bind(&product.name)
        .bind(&product.brand)
        .bind(stock_column(product)?)
        .bind(product.seller_uuid)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::InvalidReference(product.seller_uuid));
        }
        Ok(())
    }

    #[instrument(skip(self, product), fields(product_uuid = %product.uuid))]
    async fn update(&self, product: &ProductRecord) -> Result<(), CatalogError> {
        let result = sqlx::query("UPDATE product SET name = $1, brand = $2, stock = $3 WHERE uuid = $4")
            .bind(&product.name)
            .bind(&product.brand)
            .bind(stock_column(product)?)
            .bind(product.uuid)
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound(product.uuid));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, uuid: Uuid) -> Result<(), CatalogError> {
        sqlx::query("DELETE FROM product WHERE uuid = $1")
            .bind(uuid)
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        Ok(())
    }
}
