use crate::{Catalog, models::Product};
use std::future::Future;

/// Storage interface for the product catalog.
///
/// Implementations own the persisted product state. None of the operations
/// coordinate with one another: an update is a read followed by a separate
/// write, and concurrent writers race with last-write-wins semantics.
///
/// Absence is never an error. Lookups of unknown ids return `Ok(None)` or
/// `Ok(false)`, and `Err` is reserved for failures of the store itself.
pub trait CatalogRepository: Send + Sync {
    /// Failure of the underlying store
    type Error: std::error::Error + Send + Sync + 'static;

    /// Insert or overwrite each product by id, in order.
    ///
    /// Items are written independently. A backend that writes item by item
    /// reports the ones it failed to store in the returned list, in input
    /// order and paired with their id; the others stay stored. An `Err` means the call as a whole
    /// failed.
    fn upsert_products(
        &self,
        products: Vec<Product>,
    ) -> impl Future<Output = Result<Vec<(String, Self::Error)>, Self::Error>> + Send;

    /// Get a single product.
    fn get_product(
        &self,
        product_id: &str,
    ) -> impl Future<Output = Result<Option<Product>, Self::Error>> + Send;

    /// Get every product, in the backend's natural order.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send;

    /// Overwrite an existing product.
    ///
    /// # Returns
    ///
    /// Ok(true) if a product with the same id existed and was replaced,
    /// Ok(false) if there was nothing to replace.
    fn replace_product(
        &self,
        product: Product,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Remove a product, returning whether it existed.
    fn delete_product(
        &self,
        product_id: &str,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}

/// The integration point between the catalog and an outer layer.
///
/// An application owns a [`Catalog`] over some backend together with the
/// merchant-level settings that surfaces such as health checks report.
pub trait Application {
    /// The storage backend behind the catalog
    type Repository: CatalogRepository;

    /// The catalog service.
    fn catalog(&self) -> &Catalog<Self::Repository>;

    /// The merchant this feed belongs to. May be empty if unconfigured.
    fn merchant_id(&self) -> &str;
}
