use feed_core::{
    Catalog,
    ports::{Application, CatalogRepository},
};
use std::sync::Arc;

/// The server's application state: a catalog over one backend, plus the
/// merchant it belongs to.
#[derive(Debug)]
pub struct FeedApp<R> {
    catalog: Arc<Catalog<R>>,
    merchant_id: Arc<str>,
}

impl<R: CatalogRepository> FeedApp<R> {
    /// Build the state around an opened backend.
    pub fn new(repository: R, merchant_id: &str) -> Self {
        Self {
            catalog: Arc::new(Catalog::new(repository)),
            merchant_id: merchant_id.into(),
        }
    }
}

// Clones share one catalog
impl<R> Clone for FeedApp<R> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            merchant_id: Arc::clone(&self.merchant_id),
        }
    }
}

impl<R: CatalogRepository> Application for FeedApp<R> {
    type Repository = R;

    fn catalog(&self) -> &Catalog<R> {
        &self.catalog
    }

    fn merchant_id(&self) -> &str {
        &self.merchant_id
    }
}
