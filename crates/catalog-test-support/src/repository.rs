//! Test repositories — in-memory and failing implementations of the
//! catalog repository traits.

use std::sync::Mutex;

use async_trait::async_trait;
use catalog_core::error::CatalogError;
use catalog_core::record::{ProductRecord, SellerRecord};
use catalog_core::repository::{ProductRepository, SellerRepository};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tables {
    next_product_id: i64,
    products: Vec<ProductRecord>,
    sellers: Vec<SellerRecord>,
}

/// An in-memory product and seller store with the same observable contract
/// as the `PostgreSQL` repositories: rows keep insertion order, inserts
/// resolve the seller, deletes of absent rows succeed.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    tables: Mutex<Tables>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a seller and return its public UUID.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn add_seller(&self, email: &str, phone: &str) -> Uuid {
        let mut tables = self.tables.lock().unwrap();
        let uuid = Uuid::new_v4();
        let seller_id = i64::try_from(tables.sellers.len()).unwrap() + 1;
        tables.sellers.push(SellerRecord {
            seller_id,
            uuid,
            email: email.to_owned(),
            phone: phone.to_owned(),
        });
        uuid
    }

    /// Seed a product for an existing seller and return its public UUID.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn add_product(&self, name: &str, brand: &str, stock: u32, seller_uuid: Uuid) -> Uuid {
        let mut tables = self.tables.lock().unwrap();
        tables.next_product_id += 1;
        let uuid = Uuid::new_v4();
        let product_id = tables.next_product_id;
        tables.products.push(ProductRecord {
            product_id,
            uuid,
            name: name.to_owned(),
            brand: brand.to_owned(),
            stock,
            seller_uuid,
        });
        uuid
    }

    /// Returns a snapshot of all stored products in storage order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn products(&self) -> Vec<ProductRecord> {
        self.tables.lock().unwrap().products.clone()
    }
}

fn page<T: Clone>(rows: &[T], offset: u32, limit: u32) -> Vec<T> {
    rows.iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn find_by_uuid(&self, uuid: Uuid) -> Result<ProductRecord, CatalogError> {
        self.tables
            .lock()
            .unwrap()
            .products
            .iter()
            .find(|p| p.uuid == uuid)
            .cloned()
            .ok_or(CatalogError::NotFound(uuid))
    }

    async fn list(&self, offset: u32, limit: u32) -> Result<Vec<ProductRecord>, CatalogError> {
        Ok(page(&self.tables.lock().unwrap().products, offset, limit))
    }

    async fn insert(&self, product: &ProductRecord) -> Result<(), CatalogError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.sellers.iter().any(|s| s.uuid == product.seller_uuid) {
            return Err(CatalogError::InvalidReference(product.seller_uuid));
        }
        tables.next_product_id += 1;
        let product_id = tables.next_product_id;
        tables.products.push(ProductRecord {
            product_id,
            ..product.clone()
        });
        Ok(())
    }

    async fn update(&self, product: &ProductRecord) -> Result<(), CatalogError> {
        let mut tables = self.tables.lock().unwrap();
        let stored = tables
            .products
            .iter_mut()
            .find(|p| p.uuid == product.uuid)
            .ok_or(CatalogError::NotFound(product.uuid))?;
        stored.name.clone_from(&product.name);
        stored.brand.clone_from(&product.brand);
        stored.stock = product.stock;
        Ok(())
    }

    async fn delete(&self, uuid: Uuid) -> Result<(), CatalogError> {
        self.tables
            .lock()
            .unwrap()
            .products
            .retain(|p| p.uuid != uuid);
        Ok(())
    }
}

#[async_trait]
impl SellerRepository for InMemoryCatalog {
    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<SellerRecord>, CatalogError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .sellers
            .iter()
            .find(|s| s.uuid == uuid)
            .cloned())
    }

    async fn list(&self, offset: u32, limit: u32) -> Result<Vec<SellerRecord>, CatalogError> {
        Ok(page(&self.tables.lock().unwrap().sellers, offset, limit))
    }
}

/// A repository that always returns a query error. Useful for testing
/// error-handling paths.
#[derive(Debug)]
pub struct FailingProductRepository;

#[async_trait]
impl ProductRepository for FailingProductRepository {
    async fn find_by_uuid(&self, _uuid: Uuid) -> Result<ProductRecord, CatalogError> {
        Err(CatalogError::Query("connection refused".into()))
    }

    async fn list(&self, _offset: u32, _limit: u32) -> Result<Vec<ProductRecord>, CatalogError> {
        Err(CatalogError::Query("connection refused".into()))
    }

    async fn insert(&self, _product: &ProductRecord) -> Result<(), CatalogError> {
        Err(CatalogError::Query("connection refused".into()))
    }

    async fn update(&self, _product: &ProductRecord) -> Result<(), CatalogError> {
        Err(CatalogError::Query("connection refused".into()))
    }

    async fn delete(&self, _uuid: Uuid) -> Result<(), CatalogError> {
        Err(CatalogError::Query("connection refused".into()))
    }
}

#[async_trait]
impl SellerRepository for FailingProductRepository {
    async fn find_by_uuid(&self, _uuid: Uuid) -> Result<Option<SellerRecord>, CatalogError> {
        Err(CatalogError::Query("connection refused".into()))
    }

    async fn list(&self, _offset: u32, _limit: u32) -> Result<Vec<SellerRecord>, CatalogError> {
        Err(CatalogError::Query("connection refused".into()))
    }
}
