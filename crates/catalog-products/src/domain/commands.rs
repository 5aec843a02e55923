//! Commands for the product context.

use catalog_core::error::CatalogError;
use uuid::Uuid;

/// Largest stock value the storage column can hold.
#[allow(clippy::cast_sign_loss)]
pub const MAX_STOCK: u32 = i32::MAX as u32;

/// Command to create a product for an existing seller.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Product name.
    pub name: String,
    /// Product brand.
    pub brand: String,
    /// Initial stock.
    pub stock: u32,
    /// Public UUID of the owning seller.
    pub seller_uuid: Uuid,
}

/// Command to replace a product's name, brand and stock.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The product to update.
    pub product_uuid: Uuid,
    /// New name.
    pub name: String,
    /// New brand.
    pub brand: String,
    /// New stock.
    pub stock: u32,
}

/// Command to delete a product.
#[derive(Debug, Clone)]
pub struct DeleteProduct {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The product to delete.
    pub product_uuid: Uuid,
}

impl CreateProduct {
    /// Checks the product attributes.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` for a blank name or brand, or a
    /// stock above [`MAX_STOCK`].
    pub fn validate(&self) -> Result<(), CatalogError> {
        validate_attributes(&self.name, &self.brand, self.stock)
    }
}

impl UpdateProduct {
    /// Checks the product attributes.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` for a blank name or brand, or a
    /// stock above [`MAX_STOCK`].
    pub fn validate(&self) -> Result<(), CatalogError> {
        validate_attributes(&self.name, &self.brand, self.stock)
    }
}

fn validate_attributes(name: &str, brand: &str, stock: u32) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::Validation("name must not be blank".into()));
    }
    if brand.trim().is_empty() {
        return Err(CatalogError::Validation("brand must not be blank".into()));
    }
    if stock > MAX_STOCK {
        return Err(CatalogError::Validation(format!(
            "stock must not exceed {MAX_STOCK}"
        )));
    }
    Ok(())
}
