use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;

use agrivest_core::errors::Result;
use agrivest_core::products::{
    NewProduct, Product, ProductRepositoryTrait, ProductStatus, ProductUpdate,
};

use super::model::ProductDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::products;

/// Repository for managing product data in the database
pub struct ProductRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ProductRepository {
    /// Creates a new ProductRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn get_with_conn(conn: &mut SqliteConnection, product_id_param: &str) -> Result<Product> {
        products::table
            .select(ProductDB::as_select())
            .find(product_id_param)
            .first::<ProductDB>(conn)
            .into_core()?
            .try_into()
    }

    fn set_status_with_conn(
        conn: &mut SqliteConnection,
        product_id_param: &str,
        status: ProductStatus,
    ) -> Result<Product> {
        diesel::update(products::table.find(product_id_param))
            .set((
                products::status.eq(status.as_str()),
                products::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(conn)
            .into_core()?;

        Self::get_with_conn(conn, product_id_param)
    }
}

#[async_trait]
impl ProductRepositoryTrait for ProductRepository {
    fn get_by_id(&self, product_id: &str) -> Result<Product> {
        let mut conn = get_connection(&self.pool)?;
        Self::get_with_conn(&mut conn, product_id)
    }

    /// Lists products in the database, optionally filtering by status
    fn list(&self, status_filter: Option<ProductStatus>) -> Result<Vec<Product>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = products::table.into_boxed();

        if let Some(status) = status_filter {
            query = query.filter(products::status.eq(status.as_str()));
        }

        let results = query
            .select(ProductDB::as_select())
            .order(products::created_at.desc())
            .load::<ProductDB>(&mut conn)
            .into_core()?;

        results.into_iter().map(Product::try_from).collect()
    }

    async fn create(&self, new_product: NewProduct) -> Result<Product> {
        new_product.validate()?;

        let product_db: ProductDB = new_product.into();
        self.writer
            .exec(move |conn| {
                diesel::insert_into(products::table)
                    .values(&product_db)
                    .execute(conn)
                    .into_core()?;

                product_db.try_into()
            })
            .await
    }

    async fn update(&self, product_update: ProductUpdate) -> Result<Product> {
        product_update.validate()?;

        self.writer
            .exec(move |conn| {
                diesel::update(products::table.find(&product_update.id))
                    .set((
                        products::title.eq(&product_update.title),
                        products::description.eq(product_update.description.clone()),
                        products::cycle_months.eq(product_update.cycle_months),
                        products::return_per_cycle
                            .eq(product_update.return_per_cycle.to_string()),
                        products::updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;

                Self::get_with_conn(conn, &product_update.id)
            })
            .await
    }

    async fn set_status(&self, product_id: &str, status: ProductStatus) -> Result<Product> {
        let product_id = product_id.to_string();
        self.writer
            .exec(move |conn| Self::set_status_with_conn(conn, &product_id, status))
            .await
    }

    fn find_by_id_in_tx(
        &self,
        conn: &mut SqliteConnection,
        product_id: &str,
    ) -> Result<Option<Product>> {
        products::table
            .select(ProductDB::as_select())
            .find(product_id)
            .first::<ProductDB>(conn)
            .optional()
            .into_core()?
            .map(Product::try_from)
            .transpose()
    }

    fn add_funding_in_tx(
        &self,
        conn: &mut SqliteConnection,
        product_id: &str,
        amount: Decimal,
    ) -> Result<Product> {
        let product = Self::get_with_conn(conn, product_id)?;
        let new_total = product.current_amount + amount;

        diesel::update(products::table.find(product_id))
            .set((
                products::current_amount.eq(new_total.to_string()),
                products::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(conn)
            .into_core()?;

        Self::get_with_conn(conn, product_id)
    }

    fn set_status_in_tx(
        &self,
        conn: &mut SqliteConnection,
        product_id: &str,
        status: ProductStatus,
    ) -> Result<Product> {
        Self::set_status_with_conn(conn, product_id, status)
    }
}
