use feed_core::{
    Catalog,
    ports::{Application, CatalogRepository},
};
use std::sync::Arc;

// A minimal application over whichever backend a test injects
pub struct TestApp<R> {
    catalog: Arc<Catalog<R>>,
    merchant_id: Arc<str>,
}

impl<R> Clone for TestApp<R> {
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            merchant_id: self.merchant_id.clone(),
        }
    }
}

impl<R: CatalogRepository> TestApp<R> {
    pub fn new(repository: R, merchant_id: &str) -> Self {
        Self {
            catalog: Arc::new(Catalog::new(repository)),
            merchant_id: merchant_id.into(),
        }
    }
}

impl<R: CatalogRepository> Application for TestApp<R> {
    type Repository = R;

    fn catalog(&self) -> &Catalog<R> {
        &self.catalog
    }

    fn merchant_id(&self) -> &str {
        &self.merchant_id
    }
}
