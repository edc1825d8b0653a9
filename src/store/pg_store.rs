use async_trait::async_trait;
use sqlx::PgPool;

use super::ProductStore;
use crate::{
    database,
    error::Result,
    models::{Product, ProductPayload},
    queries::product_queries,
};

#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn find_all(&self) -> Result<Vec<Product>> {
        product_queries::find_all(&self.pool).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>> {
        product_queries::find_by_id(&self.pool, id).await
    }

    async fn find_by_price_greater_than(&self, threshold: i32) -> Result<Vec<Product>> {
        product_queries::find_by_price_greater_than(&self.pool, threshold).await
    }

    async fn find_by_name_like(&self, pattern: &str) -> Result<Vec<Product>> {
        product_queries::find_by_name_like(&self.pool, pattern).await
    }

    async fn save(&self, product: &ProductPayload) -> Result<Option<Product>> {
        match product.id {
            Some(id) => product_queries::upsert(&self.pool, id, product).await,
            None => product_queries::insert(&self.pool, product).await,
        }
    }

    async fn delete_by_id(&self, id: i32) -> Result<()> {
        let deleted = product_queries::delete_by_id(&self.pool, id).await?;
        if deleted == 0 {
            tracing::debug!("No product with id {} to delete", id);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        database::check_health(&self.pool).await
    }
}
