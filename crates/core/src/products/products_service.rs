use log::info;
use std::sync::Arc;

use super::products_model::{NewProduct, Product, ProductStatus, ProductUpdate};
use super::products_traits::{ProductRepositoryTrait, ProductServiceTrait};
use crate::errors::{Error, Result, ValidationError};

/// Service for managing the product catalog.
pub struct ProductService {
    repository: Arc<dyn ProductRepositoryTrait>,
}

impl ProductService {
    /// Creates a new ProductService instance.
    pub fn new(repository: Arc<dyn ProductRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl ProductServiceTrait for ProductService {
    async fn create_product(&self, new_product: NewProduct) -> Result<Product> {
        new_product.validate()?;
        let product = self.repository.create(new_product).await?;
        info!("Created product {} ({})", product.title, product.id);
        Ok(product)
    }

    async fn update_product(&self, product_update: ProductUpdate) -> Result<Product> {
        product_update.validate()?;
        self.repository.update(product_update).await
    }

    fn get_product(&self, product_id: &str) -> Result<Product> {
        (*self.repository).get_by_id(product_id)
    }

    fn list_products(&self) -> Result<Vec<Product>> {
        (*self.repository).list(None)
    }

    fn list_active_products(&self) -> Result<Vec<Product>> {
        (*self.repository).list(Some(ProductStatus::Active))
    }

    /// Marks a product COMPLETED at the end of its cycle.
    ///
    /// Allowed from ACTIVE or FUNDED; completing twice is rejected.
    async fn complete_product(&self, product_id: &str) -> Result<Product> {
        let product = self.repository.get_by_id(product_id)?;
        if product.status == ProductStatus::Completed {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Product {} is already completed",
                product_id
            ))));
        }

        let updated = self
            .repository
            .set_status(product_id, ProductStatus::Completed)
            .await?;
        info!("Completed product {} ({})", updated.title, updated.id);
        Ok(updated)
    }
}
