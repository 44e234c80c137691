use crate::{Table, replace, upsert_all};
use feed_core::{models::Product, ports::CatalogRepository};
use std::{convert::Infallible, sync::Arc};
use tokio::sync::RwLock;

/// A catalog that lives only in memory.
///
/// # Example
///
/// ```
/// # use feed_local::MemoryDb;
/// # use feed_core::Catalog;
/// let catalog = Catalog::new(MemoryDb::default());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryDb {
    products: Arc<RwLock<Table>>,
}

impl MemoryDb {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of stored products.
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// Whether the catalog is empty.
    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

impl CatalogRepository for MemoryDb {
    type Error = Infallible;

    async fn upsert_products(
        &self,
        products: Vec<Product>,
    ) -> Result<Vec<(String, Self::Error)>, Self::Error> {
        upsert_all(&mut *self.products.write().await, products);
        Ok(Vec::new())
    }

    async fn get_product(&self, product_id: &str) -> Result<Option<Product>, Self::Error> {
        Ok(self.products.read().await.get(product_id).cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>, Self::Error> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn replace_product(&self, product: Product) -> Result<bool, Self::Error> {
        Ok(replace(&mut *self.products.write().await, product))
    }

    async fn delete_product(&self, product_id: &str) -> Result<bool, Self::Error> {
        Ok(self
            .products
            .write()
            .await
            .shift_remove(product_id)
            .is_some())
    }
}
