//! Command handlers for the product context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: validate, persist, then announce stock changes.

use catalog_core::error::CatalogError;
use catalog_core::notifier::{StockChangeEvent, StockChangePublisher};
use catalog_core::record::ProductRecord;
use catalog_core::repository::{ProductRepository, SellerRepository};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::commands::{CreateProduct, DeleteProduct, UpdateProduct};
use crate::domain::representation::{ProductShape, ProductV1};

/// Handles the `CreateProduct` command: checks the seller, assigns a fresh
/// UUID and persists the product.
///
/// # Errors
///
/// Returns `CatalogError::Validation` for invalid attributes.
/// Returns `CatalogError::InvalidReference` if the seller does not exist.
/// Returns `CatalogError::Query` if the datastore fails.
pub async fn handle_create_product(
    command: &CreateProduct,
    products: &dyn ProductRepository,
    sellers: &dyn SellerRepository,
) -> Result<ProductV1, CatalogError> {
    command.validate()?;

    let seller = sellers
        .find_by_uuid(command.seller_uuid)
        .await?
        .ok_or(CatalogError::InvalidReference(command.seller_uuid))?;

    let record = ProductRecord {
        product_id: 0,
        uuid: Uuid::new_v4(),
        name: command.name.clone(),
        brand: command.brand.clone(),
        stock: command.stock,
        seller_uuid: seller.uuid,
    };
    products.insert(&record).await?;

    info!(
        correlation_id = %command.correlation_id,
        product_uuid = %record.uuid,
        "product created"
    );

    Ok(ProductV1::from_record(record, &()))
}

/// Handles the `UpdateProduct` command: replaces name, brand and stock and,
/// when the stock value changed, publishes a `StockChangeEvent`.
///
/// Publishing happens after the update is stored and cannot fail the
/// command.
///
/// # Errors
///
/// Returns `CatalogError::Validation` for invalid attributes.
/// Returns `CatalogError::NotFound` if the product does not exist.
/// Returns `CatalogError::Query` if the datastore fails.
pub async fn handle_update_product(
    command: &UpdateProduct,
    products: &dyn ProductRepository,
    sellers: &dyn SellerRepository,
    publisher: &dyn StockChangePublisher,
) -> Result<ProductV1, CatalogError> {
    command.validate()?;

    let mut record = products.find_by_uuid(command.product_uuid).await?;
    let old_stock = record.stock;

    record.name.clone_from(&command.name);
    record.brand.clone_from(&command.brand);
    record.stock = command.stock;

    products.update(&record).await?;

    info!(
        correlation_id = %command.correlation_id,
        product_uuid = %record.uuid,
        "product updated"
    );

    if old_stock != record.stock {
        announce_stock_change(&record, old_stock, sellers, publisher).await;
    }

    Ok(ProductV1::from_record(record, &()))
}

/// Handles the `DeleteProduct` command. The product must exist.
///
/// # Errors
///
/// Returns `CatalogError::NotFound` if the product does not exist.
/// Returns `CatalogError::Query` if the datastore fails.
pub async fn handle_delete_product(
    command: &DeleteProduct,
    products: &dyn ProductRepository,
) -> Result<(), CatalogError> {
    products.find_by_uuid(command.product_uuid).await?;
    products.delete(command.product_uuid).await?;

    info!(
        correlation_id = %command.correlation_id,
        product_uuid = %command.product_uuid,
        "product deleted"
    );

    Ok(())
}

async fn announce_stock_change(
    record: &ProductRecord,
    old_stock: u32,
    sellers: &dyn SellerRepository,
    publisher: &dyn StockChangePublisher,
) {
    let seller = match sellers.find_by_uuid(record.seller_uuid).await {
        Ok(Some(seller)) => seller,
        Ok(None) => {
            warn!(seller_uuid = %record.seller_uuid, "seller vanished; stock change not announced");
            return;
        }
        Err(e) => {
            warn!(seller_uuid = %record.seller_uuid, error = %e, "seller lookup failed; stock change not announced");
            return;
        }
    };

    let event = StockChangeEvent {
        email: seller.email,
        phone: seller.phone,
        old_stock,
        new_stock: record.stock,
        product_name: record.name.clone(),
        seller_uuid: seller.uuid,
    };
    publisher.publish(&event).await;
}
