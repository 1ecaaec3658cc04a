//! Product repository and service traits.

use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;

use super::products_model::{NewProduct, Product, ProductStatus, ProductUpdate};
use crate::errors::Result;

/// Trait defining the contract for Product repository operations.
#[async_trait]
pub trait ProductRepositoryTrait: Send + Sync {
    /// Retrieves a product by its ID.
    fn get_by_id(&self, product_id: &str) -> Result<Product>;

    /// Lists products, optionally filtered by status.
    fn list(&self, status_filter: Option<ProductStatus>) -> Result<Vec<Product>>;

    /// Creates a new product.
    async fn create(&self, new_product: NewProduct) -> Result<Product>;

    /// Updates a product's descriptive fields.
    async fn update(&self, product_update: ProductUpdate) -> Result<Product>;

    /// Sets a product's status outside of a ledger transaction.
    async fn set_status(&self, product_id: &str, status: ProductStatus) -> Result<Product>;

    /// Reads a product within a transaction.
    fn find_by_id_in_tx(
        &self,
        conn: &mut SqliteConnection,
        product_id: &str,
    ) -> Result<Option<Product>>;

    /// Increments a product's raised amount within a transaction and returns
    /// the updated row.
    fn add_funding_in_tx(
        &self,
        conn: &mut SqliteConnection,
        product_id: &str,
        amount: Decimal,
    ) -> Result<Product>;

    /// Sets a product's status within a transaction.
    fn set_status_in_tx(
        &self,
        conn: &mut SqliteConnection,
        product_id: &str,
        status: ProductStatus,
    ) -> Result<Product>;
}

/// Trait defining the contract for Product service operations.
#[async_trait]
pub trait ProductServiceTrait: Send + Sync {
    /// Creates a new product with business validation.
    async fn create_product(&self, new_product: NewProduct) -> Result<Product>;

    /// Updates a product's descriptive fields with business validation.
    async fn update_product(&self, product_update: ProductUpdate) -> Result<Product>;

    /// Retrieves a product by ID.
    fn get_product(&self, product_id: &str) -> Result<Product>;

    /// Lists the whole catalog.
    fn list_products(&self) -> Result<Vec<Product>>;

    /// Lists products open for investment.
    fn list_active_products(&self) -> Result<Vec<Product>>;

    /// Terminal administrative transition at the end of a product's cycle.
    async fn complete_product(&self, product_id: &str) -> Result<Product>;
}
