mod pg_store;

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{Product, ProductPayload},
};

pub use pg_store::PgProductStore;

/// Typed access to the `products` table.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every stored product, in store order.
    async fn find_all(&self) -> Result<Vec<Product>>;

    /// `None` when no row has this id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>>;

    /// Products whose price is strictly greater than `threshold`.
    async fn find_by_price_greater_than(&self, threshold: i32) -> Result<Vec<Product>>;

    /// Products whose name matches a LIKE pattern (`%` wildcards).
    async fn find_by_name_like(&self, pattern: &str) -> Result<Vec<Product>>;

    /// Inserts when `product.id` is unset, otherwise replaces the row with
    /// that id. `None` means the write produced no row.
    async fn save(&self, product: &ProductPayload) -> Result<Option<Product>>;

    /// Deleting an absent id is a no-op.
    async fn delete_by_id(&self, id: i32) -> Result<()>;

    /// Round trip to the backing store, used by the readiness check.
    async fn ping(&self) -> Result<()>;
}
